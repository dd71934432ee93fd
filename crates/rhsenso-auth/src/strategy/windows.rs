/// Reduce a proxy-asserted Windows identity to the bare account name.
///
/// `DOMAIN\user` and `user@REALM` both become `user`. Returns `None` when
/// nothing is left.
pub fn normalize_windows_user(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    let without_domain = raw.rsplit_once('\\').map_or(raw, |(_, user)| user);
    let user = without_domain
        .split_once('@')
        .map_or(without_domain, |(user, _)| user)
        .trim();
    (!user.is_empty()).then_some(user)
}
