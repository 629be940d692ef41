use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::f32::consts::TAU;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::events::{EventSink, GameEvent};

const SAMPLE_RATE: u32 = 44_100;

/// Decoded sound file, cheap to clone for each playback
type Clip = Buffered<Decoder<BufReader<File>>>;

/// Sound effects the game can play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Shoot,
    EnemyHit,
    PlayerHit,
    GameOver,
    LevelUp,
}

impl Sound {
    /// The sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Sound> {
        match event {
            GameEvent::Shoot => Some(Sound::Shoot),
            GameEvent::EnemyHit => Some(Sound::EnemyHit),
            GameEvent::PlayerHit { .. } => Some(Sound::PlayerHit),
            GameEvent::GameOver => Some(Sound::GameOver),
            GameEvent::LevelUp => Some(Sound::LevelUp),
            GameEvent::HighScoreChanged(_) => None,
        }
    }

    /// Synthesized version of the sound
    pub fn tone(&self) -> Tone {
        match self {
            Sound::Shoot => Tone::new(800.0, 400.0, 0.3, 0.1),
            Sound::EnemyHit => Tone::new(200.0, 50.0, 0.4, 0.2),
            Sound::PlayerHit => Tone::new(150.0, 150.0, 0.5, 0.3),
            Sound::GameOver => Tone::new(440.0, 110.0, 0.5, 0.8),
            Sound::LevelUp => Tone::new(440.0, 880.0, 0.4, 0.4),
        }
    }

    /// File name stem looked up in the sounds directory
    fn file_stem(&self) -> Option<&'static str> {
        match self {
            Sound::GameOver => Some("gameover"),
            Sound::LevelUp => Some("levelup"),
            _ => None,
        }
    }
}

/// Sine sweep with exponential frequency and gain ramps, down to a gain of
/// 0.01 at the end
#[derive(Debug, Clone)]
pub struct Tone {
    start_hz: f32,
    end_hz: f32,
    gain: f32,
    seconds: f32,
    total_samples: u32,
    index: u32,
    phase: f32,
}

impl Tone {
    const END_GAIN: f32 = 0.01;

    pub fn new(start_hz: f32, end_hz: f32, gain: f32, seconds: f32) -> Self {
        Self {
            start_hz,
            end_hz,
            gain,
            seconds,
            total_samples: (seconds * SAMPLE_RATE as f32) as u32,
            index: 0,
            phase: 0.0,
        }
    }
}

impl Iterator for Tone {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.index >= self.total_samples {
            return None;
        }

        let progress = self.index as f32 / self.total_samples as f32;
        let freq = self.start_hz * (self.end_hz / self.start_hz).powf(progress);
        let gain = self.gain * (Self::END_GAIN / self.gain).powf(progress);

        let sample = (self.phase * TAU).sin() * gain;
        self.phase = (self.phase + freq / SAMPLE_RATE as f32).fract();
        self.index += 1;
        Some(sample)
    }
}

impl Source for Tone {
    fn current_frame_len(&self) -> Option<usize> {
        Some((self.total_samples - self.index) as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(self.seconds))
    }
}

/// Audio manager for playing sound effects
pub struct AudioManager {
    /// Output device; `None` when no device could be opened
    output: Option<(OutputStream, OutputStreamHandle)>,
    game_over_clip: Option<Clip>,
    level_up_clip: Option<Clip>,
    volume: f32,
}

impl AudioManager {
    /// Open the default output device and pre-load the optional sound files.
    /// Without a device the manager stays silent.
    pub fn new(sounds_dir: &Path, volume: f32) -> Self {
        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(err) => {
                log::warn!("Failed to initialize audio, continuing without sound: {err}");
                None
            }
        };

        Self {
            output,
            game_over_clip: load_clip(sounds_dir, Sound::GameOver),
            level_up_clip: load_clip(sounds_dir, Sound::LevelUp),
            volume,
        }
    }

    /// Manager that never plays anything
    pub fn silent() -> Self {
        Self {
            output: None,
            game_over_clip: None,
            level_up_clip: None,
            volume: 0.0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some() && self.volume > 0.0
    }

    pub fn play(&self, sound: Sound) {
        if !self.is_enabled() {
            return;
        }
        let Some((_, handle)) = &self.output else {
            return;
        };

        // Ignore errors for sound playback - don't want to crash the game
        let Ok(sink) = Sink::try_new(handle) else {
            return;
        };
        sink.set_volume(self.volume);

        let clip = match sound {
            Sound::GameOver => self.game_over_clip.as_ref(),
            Sound::LevelUp => self.level_up_clip.as_ref(),
            _ => None,
        };
        match clip {
            Some(clip) => sink.append(clip.clone()),
            None => sink.append(sound.tone()),
        }
        sink.detach();
    }
}

impl EventSink for AudioManager {
    fn handle(&mut self, event: &GameEvent) {
        if let Some(sound) = Sound::for_event(event) {
            self.play(sound);
        }
    }
}

fn load_clip(sounds_dir: &Path, sound: Sound) -> Option<Clip> {
    let stem = sound.file_stem()?;

    ["wav", "mp3", "ogg"].iter().find_map(|ext| {
        let path = sounds_dir.join(format!("{stem}.{ext}"));
        let file = File::open(&path).ok()?;
        match Decoder::new(BufReader::new(file)) {
            Ok(decoder) => {
                log::debug!("Loaded {}", path.display());
                Some(decoder.buffered())
            }
            Err(err) => {
                log::warn!("Could not decode {}: {err}", path.display());
                None
            }
        }
    })
}
