use super::*;
use crate::clock::ManualClock;
use crate::timers::TimeMode;

#[test]
fn test_parse_create_with_rollback() {
    let command = TimerCommand::parse("CREATE boss_enrage 1500").unwrap();
    assert_eq!(
        command,
        Some(TimerCommand::Create {
            name: "boss_enrage".to_string(),
            rollback_ms: 1500
        })
    );
}

#[test]
fn test_parse_rollback_defaults_to_zero() {
    let command = TimerCommand::parse("update door").unwrap();
    assert_eq!(
        command,
        Some(TimerCommand::Update {
            name: "door".to_string(),
            rollback_ms: 0
        })
    );
}

#[test]
fn test_parse_negative_rollback_and_quoted_name() {
    let command = TimerCommand::parse("Create \"Old Man's Clock\" -250").unwrap();
    assert_eq!(
        command,
        Some(TimerCommand::Create {
            name: "Old Man's Clock".to_string(),
            rollback_ms: -250
        })
    );
}

#[test]
fn test_parse_delete_and_mode() {
    assert_eq!(
        TimerCommand::parse("DELETE door").unwrap(),
        Some(TimerCommand::Delete {
            name: "door".to_string()
        })
    );
    assert_eq!(
        TimerCommand::parse("mode SECS").unwrap(),
        Some(TimerCommand::SetMode {
            token: "SECS".to_string()
        })
    );
}

#[test]
fn test_unknown_and_blank_lines_are_ignored() {
    assert_eq!(TimerCommand::parse("TELEPORT 1 2 3").unwrap(), None);
    assert_eq!(TimerCommand::parse("").unwrap(), None);
    assert_eq!(TimerCommand::parse("   ").unwrap(), None);
}

#[test]
fn test_missing_name_is_rejected() {
    let err = TimerCommand::parse("CREATE").unwrap_err();
    assert!(matches!(
        err,
        CommandError::MissingArgument {
            command: "CREATE",
            ..
        }
    ));

    let err = TimerCommand::parse("MODE").unwrap_err();
    assert!(matches!(
        err,
        CommandError::MissingArgument { command: "MODE", .. }
    ));
}

#[test]
fn test_bad_rollback_is_rejected() {
    let err = TimerCommand::parse("UPDATE door 1.5s").unwrap_err();
    match err {
        CommandError::InvalidRollback { command, value, .. } => {
            assert_eq!(command, "UPDATE");
            assert_eq!(value, "1.5s");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_bad_quoting_is_rejected() {
    let err = TimerCommand::parse("CREATE \"unterminated").unwrap_err();
    assert!(matches!(err, CommandError::InvalidQuoting));
}

#[test]
fn test_apply_dispatches_to_registry() {
    let clock = ManualClock::new(10_000);
    let mut registry = TimerRegistry::with_clock(clock.clone(), false);

    for line in ["CREATE a 500", "UPDATE b", "MODE s", "DELETE missing"] {
        let command = TimerCommand::parse(line).unwrap().unwrap();
        registry.apply(&command);
    }

    assert_eq!(registry.elapsed_millis("a"), Some(500));
    assert_eq!(registry.elapsed_millis("b"), Some(0));
    assert_eq!(registry.mode(), TimeMode::Seconds);
    assert_eq!(registry.len(), 2);

    let delete = TimerCommand::parse("DELETE a").unwrap().unwrap();
    registry.apply(&delete);
    assert_eq!(registry.elapsed_millis("a"), None);
}

#[test]
fn test_apply_unknown_mode_keeps_current() {
    let mut registry = TimerRegistry::with_clock(ManualClock::new(0), true);
    registry.apply(&TimerCommand::SetMode {
        token: "min".to_string(),
    });
    registry.apply(&TimerCommand::SetMode {
        token: "fortnights".to_string(),
    });
    assert_eq!(registry.mode(), TimeMode::Minutes);
}
