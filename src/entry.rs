use crate::target::{Defaults, HostTarget};

/// Parse a single `[user[:password]@]host[:port]` token.
///
/// The login is split off at the last `@`, the password at the first `:` of
/// the login, and the port at the last `:` of what remains. Fields the token
/// does not carry come from `defaults`. Never fails.
pub fn parse_host(token: &str, defaults: &Defaults) -> HostTarget {
	let mut target = split_token(token);
	target.apply_defaults(defaults);
	target
}

/// Same split as [`parse_host`] without applying any defaults, so callers
/// can tell which fields the token itself named.
pub(crate) fn split_token(token: &str) -> HostTarget {
	let mut user = None;
	let mut password = None;
	let hostpart = match token.rsplit_once('@') {
		Some((login, rest)) => {
			match login.split_once(':') {
				Some((u, p)) => {
					user = Some(u.to_string());
					password = Some(p.to_string());
				}
				None => user = Some(login.to_string()),
			}
			rest
		}
		None => token,
	};
	let (host, port) = match hostpart.rsplit_once(':') {
		Some((h, p)) => (h, Some(p.to_string())),
		None => (hostpart, None),
	};
	HostTarget {
		host: host.to_string(),
		port,
		user,
		password,
	}
}

/// Parse a whitespace-delimited list of host tokens, in input order.
pub fn parse_host_string(hosts: &str, defaults: &Defaults) -> Vec<HostTarget> {
	hosts
		.split_whitespace()
		.map(|token| parse_host(token, defaults))
		.collect()
}
