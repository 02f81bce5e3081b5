//! Bridge between the ECS world and the background audio thread.
//!
//! [`setup_audio`] spawns the thread once at startup; [`shutdown_audio`]
//! stops and joins it on exit. Game code never talks to the channels
//! directly: it writes [`AudioCmd`] messages which
//! `crate::systems::audio::forward_audio_cmds` relays each frame.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::warn;

/// Channels and join handle of the audio thread.
#[derive(Resource)]
pub struct AudioBridge {
    /// ECS -> audio thread.
    pub tx_cmd: Sender<AudioCmd>,
    /// Audio thread -> ECS.
    pub rx_msg: Receiver<AudioMessage>,
    pub handle: std::thread::JoinHandle<()>,
}

impl AudioBridge {
    /// Send a command straight to the audio thread.
    ///
    /// A closed channel means the thread is gone; the command is dropped.
    pub fn send(&self, cmd: AudioCmd) {
        if self.tx_cmd.send(cmd).is_err() {
            warn!("audio thread is not running, command dropped");
        }
    }
}

/// Spawn the audio thread and register the bridge plus both message queues.
pub fn setup_audio(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    init_audio_messages(world);
}

/// Insert the audio message queues without starting a thread.
///
/// Headless worlds (tests, tools) use this so systems that write
/// [`AudioCmd`] or read [`AudioMessage`] still have their resources.
pub fn init_audio_messages(world: &mut World) {
    world.init_resource::<Messages<AudioMessage>>();
    world.init_resource::<Messages<AudioCmd>>();
}

/// Ask the audio thread to stop and wait for it.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
