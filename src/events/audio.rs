//! Messages exchanged with the background audio thread.

use bevy_ecs::message::Message;

/// Sound effect ids loaded at startup.
pub const FX_HURT: &str = "hurt";
pub const FX_KEY: &str = "key";
pub const FX_FALL: &str = "fall";
/// Played together on the ending screen.
pub const FX_WIN: &str = "win";
pub const FX_CAT: &str = "cat";
/// Looping background track of the house.
pub const MUSIC_AMBIENT: &str = "ambient";

/// Commands sent *to* the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    LoadMusic { id: String, path: String },
    UnloadMusic { id: String },
    UnloadAllMusic,
    PlayMusic { id: String, looped: bool },
    StopMusic { id: String },
    PauseMusic { id: String },
    ResumeMusic { id: String },
    VolumeMusic { id: String, vol: f32 },
    LoadFx { id: String, path: String },
    PlayFx { id: String },
    UnloadFx { id: String },
    UnloadAllFx,
    Shutdown,
}

impl AudioCmd {
    pub fn play_fx(id: &str) -> Self {
        AudioCmd::PlayFx { id: id.to_string() }
    }

    pub fn stop_music(id: &str) -> Self {
        AudioCmd::StopMusic { id: id.to_string() }
    }
}

/// Messages sent *back* from the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    MusicLoaded { id: String },
    MusicUnloaded { id: String },
    MusicUnloadedAll,
    MusicLoadFailed { id: String, error: String },
    MusicPlayStarted { id: String },
    MusicStopped { id: String },
    /// Reached the end of a non-looping track.
    MusicFinished { id: String },
    MusicVolumeChanged { id: String, vol: f32 },
    FxLoaded { id: String },
    FxUnloaded { id: String },
    FxUnloadedAll,
    FxLoadFailed { id: String, error: String },
    FxFinished { id: String },
}
