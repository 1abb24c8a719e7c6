//! External commands into the application core.
//!
//! The automatic trigger path never constructs these; they exist for
//! operator tooling (and they give the invalid zig-zag tier combination a
//! reachable caller, which the automatic path by construction cannot).

/// Commands accepted by [`TurretService::handle_command`](super::service::TurretService::handle_command).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Manual deterrent burst at an explicit tier.
    Fire { full: bool, far: Option<bool> },
    /// Manual search sweep.
    Sweep,
    /// Re-center the turret.
    Home,
    /// Begin the shutdown sequence.
    Shutdown,
}
