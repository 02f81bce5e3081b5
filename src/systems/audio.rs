//! Audio systems and the background audio thread.
//!
//! - [`audio_thread`] owns the raylib audio device on its own OS thread and
//!   executes [`AudioCmd`]s, answering with [`AudioMessage`]s.
//! - [`poll_audio_messages`] / [`update_bevy_audio_messages`] pump the
//!   thread's answers into the ECS message queue each frame.
//! - [`forward_audio_cmds`] / [`update_bevy_audio_cmds`] relay commands
//!   written by game code to the thread.
//! - [`gameplay_cue_audio`] maps [`GameplayCue`]s to sound effects.
//!
//! The thread is created by [`crate::resources::audio::setup_audio`] and
//! joined by [`crate::resources::audio::shutdown_audio`].

use crate::events::audio::{AudioCmd, AudioMessage, FX_FALL, FX_HURT, FX_KEY};
use crate::events::gameplay::GameplayCue;
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};

/// Drain pending answers from the audio thread into `Messages<AudioMessage>`.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the [`AudioMessage`] queue; run after [`poll_audio_messages`].
pub fn update_bevy_audio_messages(mut messages: ResMut<Messages<AudioMessage>>) {
    messages.update();
}

/// Send every [`AudioCmd`] written this frame to the audio thread.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        bridge.send(cmd.clone());
    }
}

pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Sound effect played for a cue, if any.
pub fn cue_sound(cue: &GameplayCue) -> Option<&'static str> {
    match cue {
        GameplayCue::DamageTaken => Some(FX_HURT),
        GameplayCue::KeyCollected { .. } => Some(FX_KEY),
        GameplayCue::Fell => Some(FX_FALL),
        _ => None,
    }
}

/// Turn gameplay cues into sound effect commands.
pub fn gameplay_cue_audio(mut cues: MessageReader<GameplayCue>, mut audio: MessageWriter<AudioCmd>) {
    for cue in cues.read() {
        debug!("Cue {:?}", cue);
        if let Some(id) = cue_sound(cue) {
            audio.write(AudioCmd::play_fx(id));
        }
    }
}

/// Advance the [`GameplayCue`] queue once per frame.
pub fn update_gameplay_cues(mut msgs: ResMut<Messages<GameplayCue>>) {
    msgs.update();
}

/// Everything the audio thread owns besides the device itself.
struct Mixer<'a> {
    audio: &'a RaylibAudio,
    tx: Sender<AudioMessage>,
    musics: FxHashMap<String, Music<'a>>,
    playing: FxHashSet<String>,
    looped: FxHashSet<String>,
    sounds: FxHashMap<String, Sound<'a>>,
    fx_playing: FxHashSet<String>,
}

impl<'a> Mixer<'a> {
    fn new(audio: &'a RaylibAudio, tx: Sender<AudioMessage>) -> Self {
        Self {
            audio,
            tx,
            musics: FxHashMap::default(),
            playing: FxHashSet::default(),
            looped: FxHashSet::default(),
            sounds: FxHashMap::default(),
            fx_playing: FxHashSet::default(),
        }
    }

    fn send(&self, msg: AudioMessage) {
        let _ = self.tx.send(msg);
    }

    /// Execute one command. Returns false on shutdown.
    fn handle(&mut self, cmd: AudioCmd) -> bool {
        match cmd {
            AudioCmd::LoadMusic { id, path } => match self.audio.new_music(&path) {
                Ok(music) => {
                    info!("[audio] loaded id='{}' path='{}'", id, path);
                    self.musics.insert(id.clone(), music);
                    self.send(AudioMessage::MusicLoaded { id });
                }
                Err(e) => {
                    warn!("[audio] load failed id='{}' path='{}' error='{}'", id, path, e);
                    self.send(AudioMessage::MusicLoadFailed {
                        id,
                        error: e.to_string(),
                    });
                }
            },
            AudioCmd::PlayMusic { id, looped } => {
                if let Some(music) = self.musics.get(&id) {
                    debug!("[audio] play id='{}' looped={}", id, looped);
                    music.seek_stream(0.0);
                    music.play_stream();
                    self.playing.insert(id.clone());
                    if looped {
                        self.looped.insert(id.clone());
                    } else {
                        self.looped.remove(&id);
                    }
                    self.send(AudioMessage::MusicPlayStarted { id });
                }
            }
            AudioCmd::StopMusic { id } => {
                if let Some(music) = self.musics.get(&id) {
                    debug!("[audio] stop id='{}'", id);
                    music.stop_stream();
                    self.playing.remove(&id);
                    self.looped.remove(&id);
                    self.send(AudioMessage::MusicStopped { id });
                }
            }
            AudioCmd::PauseMusic { id } => {
                if let Some(music) = self.musics.get(&id) {
                    music.pause_stream();
                    self.playing.remove(&id);
                    self.send(AudioMessage::MusicStopped { id });
                }
            }
            AudioCmd::ResumeMusic { id } => {
                if let Some(music) = self.musics.get(&id) {
                    music.resume_stream();
                    self.playing.insert(id.clone());
                    self.send(AudioMessage::MusicPlayStarted { id });
                }
            }
            AudioCmd::VolumeMusic { id, vol } => {
                if let Some(music) = self.musics.get(&id) {
                    music.set_volume(vol);
                    self.send(AudioMessage::MusicVolumeChanged { id, vol });
                }
            }
            AudioCmd::UnloadMusic { id } => {
                if self.musics.remove(&id).is_some() {
                    self.playing.remove(&id);
                    self.looped.remove(&id);
                    self.send(AudioMessage::MusicUnloaded { id });
                }
            }
            AudioCmd::UnloadAllMusic => self.unload_all_music(),
            AudioCmd::LoadFx { id, path } => match self.audio.new_sound(&path) {
                Ok(sound) => {
                    info!("[audio] fx loaded id='{}' path='{}'", id, path);
                    self.sounds.insert(id.clone(), sound);
                    self.send(AudioMessage::FxLoaded { id });
                }
                Err(e) => {
                    warn!("[audio] fx load failed id='{}' path='{}' error='{}'", id, path, e);
                    self.send(AudioMessage::FxLoadFailed {
                        id,
                        error: e.to_string(),
                    });
                }
            },
            AudioCmd::PlayFx { id } => {
                if let Some(sound) = self.sounds.get(&id) {
                    debug!("[audio] fx play id='{}'", id);
                    sound.play();
                    self.fx_playing.insert(id);
                } else {
                    // nothing to wait for; report completion right away
                    warn!("[audio] fx play failed id='{}' reason='not loaded'", id);
                    self.send(AudioMessage::FxFinished { id });
                }
            }
            AudioCmd::UnloadFx { id } => {
                if self.sounds.remove(&id).is_some() {
                    self.fx_playing.remove(&id);
                    self.send(AudioMessage::FxUnloaded { id });
                }
            }
            AudioCmd::UnloadAllFx => self.unload_all_fx(),
            AudioCmd::Shutdown => {
                info!("[audio] shutdown requested");
                self.unload_all_music();
                self.unload_all_fx();
                return false;
            }
        }
        true
    }

    fn unload_all_music(&mut self) {
        self.musics.clear();
        self.playing.clear();
        self.looped.clear();
        self.send(AudioMessage::MusicUnloadedAll);
    }

    fn unload_all_fx(&mut self) {
        self.sounds.clear();
        self.fx_playing.clear();
        self.send(AudioMessage::FxUnloadedAll);
    }

    /// Feed music streams, restart looped tracks and report finished ones.
    fn pump(&mut self) {
        let mut ended: Vec<String> = Vec::new();
        for id in self.playing.iter() {
            if let Some(music) = self.musics.get(id) {
                if music.is_stream_playing() {
                    music.update_stream();
                } else if music.get_time_played() >= music.get_time_length() - 0.01 {
                    ended.push(id.clone());
                }
            }
        }
        for id in ended {
            match self.musics.get(&id) {
                Some(music) if self.looped.contains(&id) => {
                    music.seek_stream(0.0);
                    music.play_stream();
                    self.send(AudioMessage::MusicPlayStarted { id });
                }
                _ => {
                    self.playing.remove(&id);
                    self.send(AudioMessage::MusicFinished { id });
                }
            }
        }

        let fx_ended: Vec<String> = self
            .fx_playing
            .iter()
            .filter(|id| !self.sounds.get(*id).is_some_and(|s| s.is_playing()))
            .cloned()
            .collect();
        for id in fx_ended {
            debug!("[audio] fx finished id='{}'", id);
            self.fx_playing.remove(&id);
            self.send(AudioMessage::FxFinished { id });
        }
    }
}

/// Entry point of the dedicated audio thread.
///
/// Runs until [`AudioCmd::Shutdown`] arrives or the command channel closes.
/// Without an audio device the thread keeps answering so that anything
/// waiting on [`AudioMessage::FxFinished`] still progresses.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_evt: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("Failed to initialize audio device: {}", e);
            for cmd in rx_cmd.iter() {
                match cmd {
                    AudioCmd::Shutdown => break,
                    AudioCmd::PlayFx { id } => {
                        let _ = tx_evt.send(AudioMessage::FxFinished { id });
                    }
                    _ => {}
                }
            }
            return;
        }
    };

    info!(
        "[audio] thread starting (id={:?})",
        std::thread::current().id()
    );
    let mut mixer = Mixer::new(&audio, tx_evt);

    'run: loop {
        for cmd in rx_cmd.try_iter() {
            if !mixer.handle(cmd) {
                break 'run;
            }
        }
        mixer.pump();
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    drop(mixer);
    info!("[audio] thread exiting");
}
