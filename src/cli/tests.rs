use super::*;

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

#[test]
fn no_subcommand_means_chat() {
    let args = parse_args(&["moodbot"]);
    assert!(args.command.is_none());
    assert!(args.base_url.is_none());
    assert!(args.log.is_none());
}

#[test]
fn global_flags_work_after_subcommand() {
    let args = parse_args(&["moodbot", "health", "--base-url", "http://localhost:8000"]);
    assert_eq!(args.command, Some(Commands::Health));
    assert_eq!(args.base_url.as_deref(), Some("http://localhost:8000"));

    let args = parse_args(&["moodbot", "-l", "/tmp/moodbot.log", "chat"]);
    assert_eq!(args.command, Some(Commands::Chat));
    assert_eq!(args.log.as_deref(), Some("/tmp/moodbot.log"));
}

#[test]
fn say_collects_words_and_html_flag() {
    let args = parse_args(&["moodbot", "say", "--html", "me", "siento", "-bien"]);
    assert_eq!(
        args.command,
        Some(Commands::Say {
            html: true,
            text: vec!["me".into(), "siento".into(), "-bien".into()],
        })
    );
}

#[test]
fn say_requires_text() {
    assert!(Args::try_parse_from(["moodbot", "say"]).is_err());
}

#[test]
fn set_joins_multiword_values() {
    let args = parse_args(&["moodbot", "set", "log-file", "my", "log.txt"]);
    match args.command {
        Some(Commands::Set { key, value }) => {
            assert_eq!(key, "log-file");
            assert_eq!(value.join(" "), "my log.txt");
        }
        other => panic!("expected set command, got {other:?}"),
    }
}

#[test]
fn version_line_names_package() {
    let line = version_line();
    assert!(line.starts_with(&format!("moodbot {}", env!("CARGO_PKG_VERSION"))));
}
