//! Desktop notifications for phase changes

use tokio::process::Command;
use tracing::{debug, info};

use crate::state::{PhaseChange, TimerPhase};

#[cfg(target_os = "macos")]
const NOTIFIER_PROGRAM: &str = "osascript";
#[cfg(not(target_os = "macos"))]
const NOTIFIER_PROGRAM: &str = "notify-send";

/// Build the notification summary and body for a phase change
pub fn notification_text(change: &PhaseChange) -> (String, String) {
    let summary = match change.from {
        TimerPhase::Focus => "Focus session complete".to_string(),
        TimerPhase::ShortBreak | TimerPhase::LongBreak => "Break is over".to_string(),
        TimerPhase::Idle => "Pomodoro started".to_string(),
    };

    let body = match change.to {
        TimerPhase::Focus => "Time to focus.".to_string(),
        TimerPhase::ShortBreak => format!(
            "Take a short break. {} focus session{} done this cycle.",
            change.session_count,
            if change.session_count == 1 { "" } else { "s" }
        ),
        TimerPhase::LongBreak => "Cycle finished, take a long break.".to_string(),
        TimerPhase::Idle => "Timer stopped.".to_string(),
    };

    (summary, body)
}

/// Show a desktop notification using the platform's command-line notifier
pub async fn send_desktop_notification(summary: &str, body: &str) -> Result<(), String> {
    debug!("Sending notification: {} - {}", summary, body);

    let output = notifier_command(summary, body)
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", NOTIFIER_PROGRAM, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", NOTIFIER_PROGRAM, stderr));
    }

    Ok(())
}

#[cfg(target_os = "macos")]
fn notifier_command(summary: &str, body: &str) -> Command {
    let script = format!(
        "display notification \"{}\" with title \"{}\"",
        escape_applescript(body),
        escape_applescript(summary)
    );
    let mut command = Command::new(NOTIFIER_PROGRAM);
    command.args(["-e", &script]);
    command
}

#[cfg(not(target_os = "macos"))]
fn notifier_command(summary: &str, body: &str) -> Command {
    let mut command = Command::new(NOTIFIER_PROGRAM);
    command.args(["--app-name", "focus-loop", summary, body]);
    command
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Check if the notifier command is available on the system
pub async fn check_notifier_available() -> Result<(), String> {
    let mut command = Command::new(NOTIFIER_PROGRAM);
    if cfg!(target_os = "macos") {
        command.args(["-e", "return"]);
    } else {
        command.arg("--version");
    }

    command
        .output()
        .await
        .map_err(|_| format!("{} is not available, notifications are disabled", NOTIFIER_PROGRAM))?;

    info!("{} is available", NOTIFIER_PROGRAM);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PhaseChangeReason;
    use chrono::Utc;

    fn change(from: TimerPhase, to: TimerPhase, session_count: u32) -> PhaseChange {
        PhaseChange {
            from,
            to,
            session_count,
            reason: PhaseChangeReason::Completed,
            at: Utc::now(),
        }
    }

    #[test]
    fn focus_completion_announces_break() {
        let (summary, body) = notification_text(&change(TimerPhase::Focus, TimerPhase::ShortBreak, 1));
        assert_eq!(summary, "Focus session complete");
        assert_eq!(body, "Take a short break. 1 focus session done this cycle.");

        let (_, body) = notification_text(&change(TimerPhase::Focus, TimerPhase::ShortBreak, 2));
        assert!(body.contains("2 focus sessions"));

        let (_, body) = notification_text(&change(TimerPhase::Focus, TimerPhase::LongBreak, 0));
        assert!(body.contains("long break"));
    }

    #[test]
    fn break_completion_calls_back_to_focus() {
        let (summary, body) = notification_text(&change(TimerPhase::LongBreak, TimerPhase::Focus, 0));
        assert_eq!(summary, "Break is over");
        assert_eq!(body, "Time to focus.");
    }

    #[test]
    fn applescript_quotes_are_escaped() {
        assert_eq!(escape_applescript(r#"say "hi" \o/"#), r#"say \"hi\" \\o/"#);
    }
}
