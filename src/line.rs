use crate::entry::split_token;
use crate::target::{Defaults, HostTarget};

/// Accepted shape of a host file line, quoted in diagnostics.
pub const HOST_FORMAT: &str = "[user[:password]@]host[:port][ user][ password]";

/// Why a single host entry was rejected. The `Display` text is the diagnostic
/// reported for the offending line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("Bad line: \"{0}\". Format should be {}", HOST_FORMAT)]
    BadLine(String),
    #[error("User specified twice in line: \"{0}\"")]
    UserTwice(String),
    #[error("Password specified twice in line: \"{0}\"")]
    PasswordTwice(String),
    #[error("Missing host in line: \"{0}\"")]
    MissingHost(String),
    #[error("Invalid port \"{port}\" for host \"{host}\"")]
    InvalidPort { host: String, port: String },
}

/// True for lines a host file skips without comment: blank or `#`-prefixed.
pub fn is_skippable(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Parse one content line of a host file, in either the token syntax or the
/// legacy `host[:port] [user] [password]` syntax.
pub fn parse_host_entry(line: &str, defaults: &Defaults) -> Result<HostTarget, EntryError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.is_empty() || fields.len() > 3 {
        return Err(EntryError::BadLine(line.to_string()));
    }

    let mut target = split_token(fields[0]);
    if let Some(user) = fields.get(1) {
        if target.user.is_some() {
            return Err(EntryError::UserTwice(line.to_string()));
        }
        target.user = Some(user.to_string());
    }
    if let Some(password) = fields.get(2) {
        if target.password.is_some() {
            return Err(EntryError::PasswordTwice(line.to_string()));
        }
        target.password = Some(password.to_string());
    }
    if target.host.is_empty() {
        return Err(EntryError::MissingHost(line.to_string()));
    }

    target.apply_defaults(defaults);
    Ok(target)
}

/// Like [`parse_host_entry`] but returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str, defaults: &Defaults) -> Result<Option<HostTarget>, EntryError> {
    if is_skippable(line) {
        return Ok(None);
    }
    parse_host_entry(line.trim(), defaults).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_syntax_line() {
        let t = parse_host_entry("alice:pw@web1:2222", &Defaults::new()).unwrap();
        assert_eq!(t.host, "web1");
        assert_eq!(t.port.as_deref(), Some("2222"));
        assert_eq!(t.user.as_deref(), Some("alice"));
        assert_eq!(t.password.as_deref(), Some("pw"));
    }

    #[test]
    fn legacy_fields() {
        let t = parse_host_entry("web1:2222 alice", &Defaults::new()).unwrap();
        assert_eq!(t.user.as_deref(), Some("alice"));
        assert_eq!(t.password, None);

        let t = parse_host_entry("web1   alice\tpw", &Defaults::new()).unwrap();
        assert_eq!(t.host, "web1");
        assert_eq!(t.user.as_deref(), Some("alice"));
        assert_eq!(t.password.as_deref(), Some("pw"));
    }

    #[test]
    fn too_many_fields() {
        let line = "web1 alice pw extra";
        let err = parse_host_entry(line, &Defaults::new()).unwrap_err();
        assert_eq!(err, EntryError::BadLine(line.to_string()));
        assert_eq!(
            err.to_string(),
            "Bad line: \"web1 alice pw extra\". Format should be [user[:password]@]host[:port][ user][ password]"
        );
    }

    #[test]
    fn user_specified_twice() {
        let err = parse_host_entry("user2@host user1", &Defaults::new()).unwrap_err();
        assert_eq!(err.to_string(), "User specified twice in line: \"user2@host user1\"");

        let err = parse_host_entry("u:p@host user1 pw", &Defaults::new()).unwrap_err();
        assert!(matches!(err, EntryError::UserTwice(_)));
    }

    #[test]
    fn password_twice_message() {
        let err = EntryError::PasswordTwice("h u p".to_string());
        assert_eq!(err.to_string(), "Password specified twice in line: \"h u p\"");
    }

    #[test]
    fn empty_host_is_rejected() {
        let err = parse_host_entry("alice@", &Defaults::new()).unwrap_err();
        assert_eq!(err, EntryError::MissingHost("alice@".to_string()));
        assert!(parse_host_entry(":22", &Defaults::new()).is_err());
    }

    #[test]
    fn defaults_apply_after_legacy_fields() {
        let d = Defaults::new()
            .with_user("root")
            .with_port("22")
            .with_password("dflt");
        let t = parse_host_entry("web1 alice", &d).unwrap();
        assert_eq!(t.user.as_deref(), Some("alice"));
        assert_eq!(t.port.as_deref(), Some("22"));
        assert_eq!(t.password.as_deref(), Some("dflt"));

        // a default user does not count as "specified" for the conflict check
        assert!(parse_host_entry("web1 alice pw", &d).is_ok());
    }

    #[test]
    fn comments_and_blanks_are_skipped() {
        let d = Defaults::new();
        assert_eq!(parse_line("", &d).unwrap(), None);
        assert_eq!(parse_line("   ", &d).unwrap(), None);
        assert_eq!(parse_line("  # note", &d).unwrap(), None);
        assert!(parse_line("  web1  ", &d).unwrap().is_some());
    }

    #[test]
    fn reparsing_is_idempotent() {
        let d = Defaults::new().with_user("root");
        let a = parse_host_entry("web1:22 alice pw", &d).unwrap();
        let b = parse_host_entry("web1:22 alice pw", &d).unwrap();
        assert_eq!(a, b);
    }
}
