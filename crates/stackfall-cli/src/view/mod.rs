pub mod widgets;

/// Play session state as seen by the terminal host.
///
/// Pause lives only here; the engine has no notion of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}
