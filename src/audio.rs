//! Fire-and-forget audio triggers. Nothing the core does depends on whether
//! a sound actually played.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// A raindrop landed in the bucket.
    Catch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Music {
    Rain,
}

pub trait AudioSink {
    fn play_once(&mut self, sound: Sound);
    fn play_looping(&mut self, music: Music);
    fn stop(&mut self, music: Music);
}

/// Swallows everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioSink for Silent {
    fn play_once(&mut self, _sound: Sound) {}
    fn play_looping(&mut self, _music: Music) {}
    fn stop(&mut self, _music: Music) {}
}

/// Terminal bell output. A catch rings the bell once; looping music has no
/// terminal equivalent, so it is only tracked for display. A muted sink
/// keeps tracking music but never rings.
#[derive(Debug, Default)]
pub struct BellAudio {
    muted: bool,
    pending_bells: u32,
    music: Option<Music>,
}

impl BellAudio {
    pub fn new(muted: bool) -> Self {
        Self { muted, ..Self::default() }
    }

    /// Bells rung since the last call.
    pub fn take_bells(&mut self) -> u32 {
        std::mem::take(&mut self.pending_bells)
    }

    pub fn music(&self) -> Option<Music> {
        self.music
    }
}

impl AudioSink for BellAudio {
    fn play_once(&mut self, sound: Sound) {
        if self.muted {
            return;
        }
        match sound {
            Sound::Catch => self.pending_bells += 1,
        }
    }

    fn play_looping(&mut self, music: Music) {
        self.music = Some(music);
    }

    fn stop(&mut self, music: Music) {
        if self.music == Some(music) {
            self.music = None;
        }
    }
}
