use super::*;
use std::path::Path;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_copy() {
    match parse(&["ratebar", "copy", "a.iso", "/tmp/b.iso"]) {
        CliCommand::Copy {
            src,
            dst,
            resume,
            message,
        } => {
            assert_eq!(src, Path::new("a.iso"));
            assert_eq!(dst, Path::new("/tmp/b.iso"));
            assert!(!resume);
            assert!(message.is_none());
        }
        _ => panic!("expected Copy"),
    }
}

#[test]
fn cli_parse_copy_resume_with_message() {
    match parse(&["ratebar", "copy", "a", "b", "--resume", "-m", "pulling"]) {
        CliCommand::Copy {
            resume, message, ..
        } => {
            assert!(resume);
            assert_eq!(message.as_deref(), Some("pulling"));
        }
        _ => panic!("expected Copy with resume"),
    }
}

#[test]
fn cli_parse_simulate_defaults() {
    match parse(&["ratebar", "simulate", "--total", "5000000"]) {
        CliCommand::Simulate {
            total,
            rate,
            message,
        } => {
            assert_eq!(total, 5_000_000);
            assert_eq!(rate, 1_000_000);
            assert_eq!(message, "simulating");
        }
        _ => panic!("expected Simulate"),
    }
}

#[test]
fn cli_parse_simulate_requires_total() {
    assert!(Cli::try_parse_from(["ratebar", "simulate"]).is_err());
}

#[test]
fn cli_parse_rejects_unknown_command() {
    assert!(Cli::try_parse_from(["ratebar", "status"]).is_err());
}
