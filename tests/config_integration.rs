use folio::config::{ConfigFlags, load_config_flags, parse_flag_tokens};
use folio::content::CardView;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".foliorc");
    let content = r#"
# comment
--watch

--excerpt-limit 110

--no-gfm
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.watch);
    assert!(flags.no_gfm);
    assert!(!flags.no_breaks);
    assert_eq!(flags.excerpt_limit, Some(110));
}

#[test]
fn test_missing_config_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".foliorc");
    std::fs::write(&path, "--watch\n--excerpt-limit 110\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "folio".to_string(),
        "records".to_string(),
        "--excerpt-limit=200".to_string(),
        "--no-breaks".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.watch, "file flags should remain enabled");
    assert!(effective.no_breaks, "cli flags should be applied");
    assert_eq!(effective.excerpt_limit, Some(200), "cli should override limit");
}

#[test]
fn test_file_option_kept_when_cli_is_silent() {
    let file = ConfigFlags {
        excerpt_limit: Some(90),
        ..ConfigFlags::default()
    };
    let merged = file.union(&ConfigFlags::default());
    assert_eq!(merged.excerpt_limit(CardView::List), 90);
}
