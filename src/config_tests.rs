#[cfg(test)]
mod tests {
    use crate::config::{Config, ReadEnv};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    struct InMemoryEnv(HashMap<&'static str, &'static str>);

    impl InMemoryEnv {
        fn new(pairs: &[(&'static str, &'static str)]) -> Self {
            Self(pairs.iter().cloned().collect())
        }
    }

    impl ReadEnv for InMemoryEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    // from_file

    #[test]
    fn test_from_file_minimal() {
        let toml = r#"
[discord]
bot_token = "BOT-TOKEN-123"
"#;
        let f = write_toml(toml);
        let cfg = Config::from_file(f.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.discord.bot_token, "BOT-TOKEN-123");
        assert_eq!(cfg.discord.channels.honeypot, 0);
        assert!(cfg.discord.roles.staff.is_empty());
    }

    #[test]
    fn test_from_file_full() {
        let toml = r#"
[discord]
bot_token = "SECRET"

[discord.channels]
honeypot = 900
mod_log = 901
intro = 902
help_forum = 903

[discord.roles]
verified = 700
staff = [710, 711]

[discord.threads]
keep_pinned = [800, 801]
"#;
        let f = write_toml(toml);
        let cfg = Config::from_file(f.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.discord.channels.honeypot, 900);
        assert_eq!(cfg.discord.channels.mod_log, 901);
        assert_eq!(cfg.discord.channels.intro, 902);
        assert_eq!(cfg.discord.channels.help_forum, 903);
        assert_eq!(cfg.discord.roles.verified, 700);
        assert_eq!(cfg.discord.roles.staff, vec![710, 711]);
        assert_eq!(cfg.discord.threads.keep_pinned, vec![800, 801]);
    }

    #[test]
    fn test_from_file_missing_returns_error() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("Failed to read config file"));
    }

    #[test]
    fn test_from_file_invalid_toml_returns_error() {
        let f = write_toml("this is not valid toml !!!");
        let result = Config::from_file(f.path().to_str().unwrap());
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("Failed to parse config file"));
    }

    // from_env

    #[test]
    fn test_from_env_missing_token_returns_error() {
        let env = InMemoryEnv::new(&[]);
        let result = Config::from_env_impl(&env);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("DISCORD_BOT_TOKEN"));
    }

    #[test]
    fn test_from_env_reads_token() {
        let env = InMemoryEnv::new(&[("DISCORD_BOT_TOKEN", "env-token-abc")]);
        let cfg = Config::from_env_impl(&env).unwrap();
        assert_eq!(cfg.discord.bot_token, "env-token-abc");
    }

    #[test]
    fn test_from_env_channel_ids() {
        let env = InMemoryEnv::new(&[
            ("DISCORD_BOT_TOKEN", "tok"),
            ("HONEYPOT_CHANNEL_ID", "900"),
            ("MOD_LOG_CHANNEL_ID", "901"),
            ("HELP_CHANNEL_ID", "903"),
        ]);
        let cfg = Config::from_env_impl(&env).unwrap();
        assert_eq!(cfg.discord.channels.honeypot, 900);
        assert_eq!(cfg.discord.channels.mod_log, 901);
        assert_eq!(cfg.discord.channels.help_forum, 903);
        assert_eq!(cfg.discord.channels.intro, 0);
    }

    #[test]
    fn test_from_env_malformed_id_returns_error() {
        let env = InMemoryEnv::new(&[
            ("DISCORD_BOT_TOKEN", "tok"),
            ("HONEYPOT_CHANNEL_ID", "not-a-number"),
        ]);
        let result = Config::from_env_impl(&env);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("HONEYPOT_CHANNEL_ID"));
    }

    #[test]
    fn test_from_env_staff_role_list_parsed() {
        let env = InMemoryEnv::new(&[
            ("DISCORD_BOT_TOKEN", "tok"),
            ("STAFF_ROLE_IDS", "710, 711 ,712"),
        ]);
        let cfg = Config::from_env_impl(&env).unwrap();
        assert_eq!(cfg.discord.roles.staff, vec![710, 711, 712]);
    }

    #[test]
    fn test_from_env_keep_pinned_list_parsed() {
        let env = InMemoryEnv::new(&[
            ("DISCORD_BOT_TOKEN", "tok"),
            ("KEEP_PINNED_THREAD_IDS", "800,801"),
        ]);
        let cfg = Config::from_env_impl(&env).unwrap();
        assert_eq!(cfg.discord.threads.keep_pinned, vec![800, 801]);
    }

    #[test]
    fn test_from_env_defaults_are_inert() {
        let env = InMemoryEnv::new(&[("DISCORD_BOT_TOKEN", "tok")]);
        let cfg = Config::from_env_impl(&env).unwrap();
        assert_eq!(cfg.discord.channels.honeypot, 0);
        assert_eq!(cfg.discord.roles.verified, 0);
        assert!(cfg.discord.roles.staff.is_empty());
        assert!(cfg.discord.threads.keep_pinned.is_empty());
    }
}
