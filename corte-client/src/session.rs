//! Advisory session guarding
//!
//! The tracker logs users out after 15 minutes without interaction and
//! steers each sector to the screens it may use. Both checks are advisory —
//! the backend enforces the real rules — so this module only answers
//! questions; the host decides what to do with an expired session or a
//! denied path.

use std::time::Duration;
use std::time::Instant;

/// Default inactivity window before the session is considered expired.
pub const INACTIVITY_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Where a denied navigation should land.
pub const FALLBACK_PATH: &str = "/otimizadas";

const ALWAYS_ALLOWED: [&str; 3] = ["/", "/login", "/logout"];

/// Tracks user activity against an inactivity window.
///
/// Call [`touch`](Self::touch) on every interaction; once
/// [`is_expired`](Self::is_expired) turns true the host should redirect to
/// logout. The `*_at` variants take an explicit instant for tests.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    window: Duration,
    last_activity: Instant,
}

impl SessionGuard {
    /// Creates a guard with the default 15-minute window, counting from
    /// now.
    pub fn new() -> Self {
        Self::with_window(INACTIVITY_WINDOW)
    }

    /// Creates a guard with a custom window.
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            last_activity: Instant::now(),
        }
    }

    /// Records user activity now.
    pub fn touch(&mut self) {
        self.touch_at(Instant::now());
    }

    /// Records user activity at the given instant.
    pub fn touch_at(&mut self, at: Instant) {
        self.last_activity = at;
    }

    /// Returns `true` if the window has elapsed since the last activity.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Returns `true` if the window had elapsed at the given instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.last_activity) >= self.window
    }

    /// Time left before expiry at the given instant.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.window
            .saturating_sub(now.duration_since(self.last_activity))
    }
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// User sector, driving which screens are reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sector {
    /// Shop floor: cutting and stock screens only.
    Producao,
    /// Back office: everything but user management and outbound history.
    Administrativo,
    /// IT: every screen.
    Ti,
}

impl Sector {
    /// Parses the sector name the backend stores.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Produção" => Some(Self::Producao),
            "Administrativo" => Some(Self::Administrativo),
            "T.I" => Some(Self::Ti),
            _ => None,
        }
    }

    /// Screen paths this sector may open.
    pub fn allowed_paths(&self) -> &'static [&'static str] {
        match self {
            Self::Producao => &["/otimizadas", "/estoque", "/locais"],
            Self::Administrativo => &[
                "/index",
                "/otimizadas",
                "/estoque",
                "/locais",
                "/arquivos",
                "/etiquetas",
            ],
            Self::Ti => &[
                "/index",
                "/otimizadas",
                "/estoque",
                "/locais",
                "/arquivos",
                "/etiquetas",
                "/register",
                "/saidas",
            ],
        }
    }
}

/// Returns `true` if a user in the named sector may navigate to the path.
///
/// Login, logout and the root are always reachable. A user whose sector
/// could not be determined is not restricted, but a sector name with no
/// rules is confined to the always-allowed paths (the backend still
/// enforces its own rules).
pub fn is_path_allowed(sector: Option<&str>, path: &str) -> bool {
    if ALWAYS_ALLOWED.contains(&path) {
        return true;
    }
    let Some(name) = sector else {
        return true;
    };
    match Sector::from_name(name) {
        Some(sector) => sector
            .allowed_paths()
            .iter()
            .any(|allowed| path.starts_with(allowed)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_expiry() {
        let start = Instant::now();
        let mut guard = SessionGuard::with_window(Duration::from_secs(60));
        guard.touch_at(start);

        assert!(!guard.is_expired_at(start + Duration::from_secs(59)));
        assert!(guard.is_expired_at(start + Duration::from_secs(60)));

        // Activity resets the window.
        guard.touch_at(start + Duration::from_secs(59));
        assert!(!guard.is_expired_at(start + Duration::from_secs(100)));
        assert_eq!(
            guard.remaining_at(start + Duration::from_secs(89)),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn test_sector_paths() {
        assert!(is_path_allowed(Some("Produção"), "/estoque"));
        assert!(!is_path_allowed(Some("Produção"), "/register"));
        assert!(is_path_allowed(Some("T.I"), "/register"));
        assert!(!is_path_allowed(Some("Administrativo"), "/saidas"));
    }

    #[test]
    fn test_always_allowed_and_missing_sector() {
        assert!(is_path_allowed(Some("Produção"), "/logout"));
        assert!(is_path_allowed(Some("Produção"), "/"));
        assert!(is_path_allowed(None, "/register"));
    }

    #[test]
    fn test_unlisted_sector_is_confined() {
        // A sector the rules do not know gets no screens beyond the
        // always-allowed set; only a missing sector is unrestricted.
        assert!(!is_path_allowed(Some("Comercial"), "/estoque"));
        assert!(is_path_allowed(Some("Comercial"), "/logout"));
    }

    #[test]
    fn test_sector_names() {
        assert_eq!(Sector::from_name("Produção"), Some(Sector::Producao));
        assert_eq!(Sector::from_name("T.I"), Some(Sector::Ti));
        assert_eq!(Sector::from_name("Comercial"), None);
    }
}
