use crate::models::{Sport, StatKind};
use crate::panels::{SportPanel, panel_for};
use crate::session::SessionSnapshot;
use crate::summary::Summary;
use crate::timer::{TimerSnapshot, TimerState};
use crate::view::{Haptic, View};
use std::fmt::Write as _;

const END_PROMPT: &str = "End this session? Data will be cleared.";
const RESET_PROMPT: &str = "Reset timer?";

pub fn render_page(snapshot: &SessionSnapshot, summary: Option<&Summary>, base_path: &str) -> String {
    let (title, body) = match (snapshot.view, snapshot.sport) {
        (View::Game, Some(sport)) => {
            let panel = panel_for(sport);
            let mut body = render_game(snapshot, panel, base_path);
            if let Some(summary) = summary {
                body.push_str(&render_summary(summary, snapshot, panel, base_path));
            }
            (format!("{} Stats", sport.name()), body)
        }
        _ => ("Courtside".to_string(), render_setup(snapshot, base_path)),
    };

    PAGE_HTML
        .replace("{{TITLE}}", &title)
        .replace("{{BASE}}", base_path)
        .replace("{{RUNNING}}", bool_attr(snapshot.timer.state == TimerState::Running))
        .replace("{{BODY}}", &body)
}

fn render_setup(snapshot: &SessionSnapshot, base: &str) -> String {
    let selected = snapshot.sport.unwrap_or(Sport::Basketball);
    let mut choices = String::new();
    for sport in Sport::ALL {
        let checked = if sport == selected { " checked" } else { "" };
        let _ = write!(
            choices,
            r#"<label class="sport-choice"><input type="radio" name="sport" value="{name}"{checked} /><span>{upper}</span></label>"#,
            name = sport.name(),
            upper = sport.name().to_uppercase(),
        );
    }

    let resume = if snapshot.can_resume {
        format!(
            r#"<form method="post" action="{base}/session/resume">
        <button class="btn-secondary" type="submit" data-vibrate="{vibrate}">Resume Session</button>
      </form>"#,
            vibrate = Haptic::Navigate.attribute(),
        )
    } else {
        String::new()
    };

    format!(
        r#"<main class="setup">
    <div class="card">
      <header class="brand">
        <h1>COURTSIDE</h1>
        <p class="subtitle">Select a sport to begin</p>
      </header>
      <form method="post" action="{base}/session/start" class="sport-form">
        <div class="sport-list">{choices}</div>
        <button class="btn-primary" type="submit">Start Recording</button>
      </form>
      {resume}
    </div>
  </main>"#
    )
}

fn render_game(snapshot: &SessionSnapshot, panel: &dyn SportPanel, base: &str) -> String {
    let mut grid = String::new();
    for group in panel.button_groups() {
        if let Some(title) = group.title {
            let _ = write!(grid, r#"<div class="group-title">{title}</div>"#);
        }
        let _ = write!(grid, r#"<div class="grid cols-{}">"#, group.columns);
        for button in group.buttons {
            grid.push_str(&record_button(base, button.label, button.kind, button.tone.css_class()));
        }
        grid.push_str("</div>");
    }

    let footer = if panel.shows_timer() {
        format!(
            r#"<footer class="timer-bar">{}</footer>"#,
            render_timer(&snapshot.timer, base, "game")
        )
    } else {
        String::new()
    };

    format!(
        r#"<header class="session-header">
    <span class="eyebrow">Session Active</span>
    <h2>{sport} Stats</h2>
  </header>
  <main class="game{padded}">
    <div class="scoreboard">
      <form method="post" action="{base}/session/setup">
        <button class="btn-exit" type="submit" title="Exit" data-vibrate="{navigate}">&larr;</button>
      </form>
      <div class="score">
        <span class="score-label">{score_label}</span>
        <span class="score-value" id="score">{score}</span>
      </div>
      <a class="btn-summary" href="{base}/?summary=true" title="Summary">&#9889;</a>
    </div>
    {grid}
  </main>
  {footer}"#,
        sport = panel.sport().name(),
        padded = if panel.shows_timer() { " with-footer" } else { "" },
        navigate = Haptic::Navigate.attribute(),
        score_label = panel.score_label(),
        score = snapshot.score,
    )
}

fn record_button(base: &str, label: &str, kind: StatKind, class: &str) -> String {
    let value = value_input(kind.points());
    format!(
        r#"<form method="post" action="{base}/events">
        <input type="hidden" name="kind" value="{code}" />{value}
        <button class="stat-btn {class}" type="submit" data-vibrate="{vibrate}">{label}</button>
      </form>"#,
        code = kind.code(),
        vibrate = Haptic::Record.attribute(),
    )
}

fn render_summary(summary: &Summary, snapshot: &SessionSnapshot, panel: &dyn SportPanel, base: &str) -> String {
    let mut content = format!(
        r#"<div class="total-line"><span>Total Points</span><span class="total-value">{}</span></div>"#,
        summary.total_points
    );

    if !summary.efficiency.is_empty() {
        content.push_str(r#"<div class="section-title">Efficiency</div>"#);
        for line in &summary.efficiency {
            let _ = write!(
                content,
                r#"<div class="efficiency"><span>{}</span><span>{}%</span></div>"#,
                line.label, line.percentage
            );
        }
    }

    for section in &summary.sections {
        let _ = write!(content, r#"<div class="section-title">{}</div>"#, section.title);
        for row in &section.rows {
            let _ = write!(
                content,
                r#"<div class="summary-row"><span class="row-label {tone}">{label}</span>
          <div class="adjuster">{minus}<span class="count">{count}</span>{plus}</div></div>"#,
                tone = row.tone.css_class(),
                label = row.label,
                minus = adjust_button(base, row.kind, -1, None),
                count = row.count,
                plus = adjust_button(base, row.kind, 1, row.increment_value),
            );
        }
    }

    let timer = if panel.shows_timer() {
        format!(r#"<div class="summary-timer">{}</div>"#, render_timer(&snapshot.timer, base, "summary"))
    } else {
        String::new()
    };

    format!(
        r#"<div class="overlay">
    <div class="modal">
      <header class="modal-header">
        <h2>Stat Summary</h2>
        <div class="modal-actions">
          <form method="post" action="{base}/events/undo">
            <button class="icon-btn" type="submit" title="Undo Last" data-vibrate="{undo}">&#8630;</button>
          </form>
          <a class="icon-btn" href="{base}/" title="Close">&times;</a>
        </div>
      </header>
      <div class="modal-body">{content}</div>
      <footer class="modal-footer">
        {timer}
        <div class="grid cols-2">
          <form method="post" action="{base}/session/end" data-confirm="{END_PROMPT}">
            <input type="hidden" name="return_to" value="summary" />
            <input type="hidden" name="confirmed" value="false" />
            <button class="btn-danger" type="submit">End Session</button>
          </form>
          <a class="btn-primary" href="{base}/">Return</a>
        </div>
      </footer>
    </div>
  </div>"#,
        undo = Haptic::Undo.attribute(),
    )
}

fn adjust_button(base: &str, kind: StatKind, delta: i32, value: Option<u32>) -> String {
    let (symbol, class) = if delta > 0 { ("+", "adjust-plus") } else { ("&minus;", "adjust-minus") };
    format!(
        r#"<form method="post" action="{base}/events/adjust">
            <input type="hidden" name="kind" value="{code}" />
            <input type="hidden" name="delta" value="{delta}" />{value}
            <button class="adjust {class}" type="submit" data-vibrate="{vibrate}">{symbol}</button>
          </form>"#,
        code = kind.code(),
        value = value_input(value),
        vibrate = Haptic::Adjust.attribute(),
    )
}

fn render_timer(timer: &TimerSnapshot, base: &str, return_to: &str) -> String {
    let running = if timer.state == TimerState::Running { "running" } else { "stopped" };
    format!(
        r#"<form method="post" action="{base}/timer/reset" data-confirm="{RESET_PROMPT}">
        <input type="hidden" name="return_to" value="{return_to}" />
        <input type="hidden" name="confirmed" value="false" />
        <button class="icon-btn" type="submit" title="Reset Timer">&#8635;</button>
      </form>
      <form method="post" action="{base}/timer/toggle">
        <input type="hidden" name="return_to" value="{return_to}" />
        <button class="clock {running}" type="submit" data-vibrate="{vibrate}"><span class="clock-value" data-elapsed="{elapsed}">{clock}</span></button>
      </form>"#,
        vibrate = Haptic::Timer.attribute(),
        elapsed = timer.elapsed,
        clock = timer.clock,
    )
}

fn value_input(value: Option<u32>) -> String {
    value
        .map(|value| format!(r#"<input type="hidden" name="value" value="{value}" />"#))
        .unwrap_or_default()
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0, user-scalable=no" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --primary: #2563eb;
      --secondary: #374151;
      --accent: #ef4444;
      --background: #000000;
      --panel: #030712;
      --card: #111827;
      --line: #1f2937;
      --text: #ffffff;
      --muted: #9ca3af;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--background);
      color: var(--text);
      font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
      user-select: none;
      -webkit-user-select: none;
    }

    form {
      margin: 0;
    }

    button,
    .btn-primary,
    .btn-secondary,
    .btn-summary,
    .icon-btn {
      appearance: none;
      border: none;
      cursor: pointer;
      color: inherit;
      font: inherit;
      text-decoration: none;
      transition: transform 120ms ease, filter 120ms ease;
    }

    button:active {
      transform: scale(0.95);
      filter: brightness(1.25);
    }

    .setup {
      min-height: 100vh;
      display: grid;
      place-items: center;
      padding: 24px;
    }

    .card {
      width: min(420px, 100%);
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 18px;
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    .brand {
      text-align: center;
    }

    .brand h1 {
      margin: 0 0 6px;
      color: var(--primary);
      font-size: 2.4rem;
      font-style: italic;
      font-weight: 900;
      letter-spacing: -0.04em;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.15em;
    }

    .sport-form,
    .sport-list {
      display: grid;
      gap: 14px;
    }

    .sport-choice input {
      position: absolute;
      opacity: 0;
    }

    .sport-choice span {
      display: block;
      text-align: center;
      padding: 22px 0;
      border-radius: 16px;
      border: 2px solid var(--line);
      background: var(--line);
      color: var(--muted);
      font-weight: 900;
      font-size: 1.2rem;
    }

    .sport-choice input:checked + span {
      background: var(--primary);
      border-color: var(--primary);
      color: var(--text);
    }

    .btn-primary {
      display: block;
      width: 100%;
      text-align: center;
      padding: 18px;
      border-radius: 16px;
      background: var(--primary);
      font-weight: 900;
      text-transform: uppercase;
      letter-spacing: 0.15em;
    }

    .sport-form .btn-primary {
      background: var(--text);
      color: var(--background);
    }

    .btn-secondary {
      width: 100%;
      padding: 14px;
      border-radius: 16px;
      background: var(--line);
      border: 1px solid var(--secondary);
      font-weight: 700;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.15em;
    }

    .session-header {
      position: sticky;
      top: 0;
      z-index: 40;
      padding: 14px;
      text-align: center;
      background: var(--panel);
      border-bottom: 1px solid var(--line);
    }

    .eyebrow,
    .group-title,
    .score-label,
    .section-title {
      display: block;
      font-size: 10px;
      font-weight: 900;
      letter-spacing: 0.3em;
      text-transform: uppercase;
    }

    .eyebrow {
      color: var(--primary);
    }

    .session-header h2 {
      margin: 4px 0 0;
      font-size: 1.5rem;
      font-style: italic;
      font-weight: 900;
      text-transform: uppercase;
    }

    .game {
      padding: 16px;
      display: grid;
      gap: 14px;
    }

    .game.with-footer {
      padding-bottom: 120px;
    }

    .scoreboard {
      position: relative;
      display: flex;
      align-items: center;
      justify-content: center;
      padding: 20px 0;
    }

    .scoreboard > form,
    .btn-summary {
      position: absolute;
    }

    .scoreboard > form {
      left: 0;
    }

    .btn-exit,
    .btn-summary {
      padding: 14px 18px;
      border-radius: 16px;
      font-size: 1.6rem;
      font-weight: 900;
    }

    .btn-exit {
      background: #7e22ce;
    }

    .btn-summary {
      right: 0;
      background: #facc15;
      color: var(--background);
    }

    .score {
      display: flex;
      flex-direction: column;
      align-items: center;
      padding: 14px 44px;
      border-radius: 32px;
      border: 1px solid var(--line);
      box-shadow: 0 0 40px rgba(37, 99, 235, 0.3);
    }

    .score-label {
      color: var(--primary);
    }

    .score-value {
      font-size: 4.5rem;
      font-weight: 900;
      line-height: 1;
      font-variant-numeric: tabular-nums;
    }

    .group-title {
      color: var(--muted);
      padding: 0 8px;
    }

    .grid {
      display: grid;
      gap: 14px;
    }

    .cols-1 { grid-template-columns: 1fr; }
    .cols-2 { grid-template-columns: repeat(2, 1fr); }
    .cols-3 { grid-template-columns: repeat(3, 1fr); }

    .stat-btn {
      width: 100%;
      min-height: 76px;
      border-radius: 16px;
      font-size: 1.4rem;
      font-weight: 900;
      text-transform: uppercase;
      border: 1px solid rgba(255, 255, 255, 0.05);
    }

    .tone-make { background: var(--primary); }
    .tone-miss { background: rgba(153, 27, 27, 0.7); }
    .tone-neutral { background: var(--line); color: #d1d5db; }
    .tone-foul { background: #c2410c; }
    .tone-feature { background: var(--primary); min-height: 140px; font-size: 2.4rem; }
    .tone-strong { background: #1e40af; }
    .tone-accent { background: #7e22ce; min-height: 100px; }

    .timer-bar {
      position: fixed;
      left: 0;
      right: 0;
      bottom: 0;
      z-index: 100;
      display: flex;
      justify-content: center;
      gap: 16px;
      padding: 16px 24px;
      background: rgba(3, 7, 18, 0.95);
      border-top: 1px solid var(--line);
    }

    .icon-btn {
      display: inline-flex;
      align-items: center;
      justify-content: center;
      width: 48px;
      height: 48px;
      border-radius: 14px;
      background: var(--line);
      border: 1px solid var(--secondary);
      font-size: 1.4rem;
    }

    .clock {
      min-width: 160px;
      padding: 10px 24px;
      border-radius: 16px;
      border-bottom: 4px solid rgba(0, 0, 0, 0.3);
      font-family: ui-monospace, monospace;
      font-size: 1.9rem;
      font-weight: 900;
    }

    .clock.running { background: #16a34a; }
    .clock.stopped { background: #b91c1c; }

    .overlay {
      position: fixed;
      inset: 0;
      z-index: 110;
      display: flex;
      align-items: center;
      justify-content: center;
      padding: 16px;
      background: rgba(0, 0, 0, 0.95);
    }

    .modal {
      width: min(520px, 100%);
      max-height: 92vh;
      display: flex;
      flex-direction: column;
      background: var(--panel);
      border: 1px solid var(--card);
      border-radius: 40px;
      overflow: hidden;
    }

    .modal-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 20px 24px;
      border-bottom: 1px solid var(--line);
    }

    .modal-header h2 {
      margin: 0;
      font-style: italic;
      font-weight: 900;
      text-transform: uppercase;
    }

    .modal-actions {
      display: flex;
      gap: 10px;
    }

    .modal-body {
      flex: 1;
      overflow-y: auto;
      padding: 8px 24px 28px;
    }

    .total-line,
    .efficiency,
    .summary-row {
      display: flex;
      align-items: center;
      justify-content: space-between;
      border-bottom: 1px solid var(--line);
    }

    .total-line {
      padding: 16px 0;
      color: var(--primary);
      font-weight: 900;
      font-style: italic;
      text-transform: uppercase;
    }

    .total-value {
      color: var(--text);
      font-size: 2.4rem;
      font-style: normal;
    }

    .section-title {
      color: #6b7280;
      padding: 22px 0 8px;
      border-bottom: 1px solid var(--line);
    }

    .efficiency {
      padding: 12px 0;
      color: #eab308;
      font-weight: 900;
      text-transform: uppercase;
    }

    .summary-row {
      padding: 8px 0;
    }

    .row-label {
      font-size: 0.75rem;
      font-weight: 900;
      letter-spacing: 0.12em;
      text-transform: uppercase;
    }

    .row-label.tone-make { background: none; color: #22c55e; }
    .row-label.tone-miss { background: none; color: var(--accent); }
    .row-label.tone-neutral { background: none; color: #d1d5db; }

    .adjuster {
      display: flex;
      align-items: center;
      gap: 12px;
    }

    .adjust {
      width: 36px;
      height: 36px;
      border-radius: 10px;
      background: var(--line);
      border: 1px solid var(--secondary);
      color: var(--muted);
      font-weight: 900;
    }

    .count {
      width: 40px;
      text-align: center;
      font-size: 1.25rem;
      font-weight: 900;
      font-variant-numeric: tabular-nums;
    }

    .modal-footer {
      display: grid;
      gap: 16px;
      padding: 20px 24px;
      background: var(--card);
      border-top: 1px solid var(--line);
    }

    .summary-timer {
      display: flex;
      justify-content: center;
      gap: 20px;
    }

    .btn-danger {
      width: 100%;
      padding: 16px;
      border-radius: 16px;
      background: rgba(69, 10, 10, 0.4);
      border: 1px solid rgba(127, 29, 29, 0.3);
      color: var(--accent);
      font-size: 0.75rem;
      font-weight: 900;
      letter-spacing: 0.15em;
      text-transform: uppercase;
    }
  </style>
</head>
<body data-base="{{BASE}}" data-running="{{RUNNING}}">
  {{BODY}}

  <script>
    const base = document.body.dataset.base;

    const vibrate = (pattern) => {
      if (!pattern || !('vibrate' in navigator)) {
        return;
      }
      navigator.vibrate(pattern.split(',').map(Number));
    };

    document.querySelectorAll('form').forEach((form) => {
      form.addEventListener('submit', (event) => {
        const prompt = form.dataset.confirm;
        if (prompt) {
          const confirmed = window.confirm(prompt);
          if (!confirmed) {
            event.preventDefault();
            return;
          }
          form.querySelector('input[name="confirmed"]').value = 'true';
        }
        const button = form.querySelector('[data-vibrate]');
        if (button) {
          vibrate(button.dataset.vibrate);
        }
      });
    });

    const formatClock = (total) => {
      const mins = Math.floor(total / 60);
      const secs = total % 60;
      return `${String(mins).padStart(2, '0')}:${String(secs).padStart(2, '0')}`;
    };

    if (document.body.dataset.running === 'true') {
      const clocks = Array.from(document.querySelectorAll('.clock-value'));
      setInterval(async () => {
        try {
          const res = await fetch(`${base}/api/state`);
          if (!res.ok) {
            return;
          }
          const state = await res.json();
          clocks.forEach((clock) => {
            clock.textContent = formatClock(state.timer.elapsed);
          });
        } catch (err) {
          console.error('failed to refresh clock', err);
        }
      }, 1000);
    }
  </script>
</body>
</html>
"#;
