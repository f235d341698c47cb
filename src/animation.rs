use crate::assets::Frame;
use crate::error::AssetError;
use std::rc::Rc;

/// Frame-timing state over a shared, immutable image sequence.
///
/// Templates live in the asset library; every entity or particle plays its
/// own copy obtained through [`Animation::fresh_copy`], so timing is never
/// shared between owners.
#[derive(Debug, Clone)]
pub struct Animation {
    images: Rc<[Frame]>,
    frame_duration: u32,
    looping: bool,
    frame: u32,
    done: bool,
}

impl Animation {
    pub fn new(images: Vec<Frame>, frame_duration: u32, looping: bool) -> Result<Self, AssetError> {
        if images.is_empty() {
            return Err(AssetError::EmptyAnimation);
        }
        if frame_duration == 0 {
            return Err(AssetError::ZeroFrameDuration);
        }
        Ok(Animation {
            images: images.into(),
            frame_duration,
            looping,
            frame: 0,
            done: false,
        })
    }

    /// Same images, duration and loop mode; playback starts over at tick 0.
    pub fn fresh_copy(&self) -> Self {
        Animation {
            images: Rc::clone(&self.images),
            frame_duration: self.frame_duration,
            looping: self.looping,
            frame: 0,
            done: false,
        }
    }

    #[inline]
    fn total_ticks(&self) -> u32 {
        self.frame_duration * self.images.len() as u32
    }

    pub fn advance(&mut self) {
        let total = self.total_ticks();
        if self.looping {
            self.frame = (self.frame + 1) % total;
        } else {
            self.frame = (self.frame + 1).min(total - 1);
            if self.frame >= total - 1 {
                self.done = true;
            }
        }
    }

    /// Jumps to an arbitrary tick; wraps when looping, clamps to the last tick otherwise.
    pub fn seek(&mut self, frame: u32) {
        let total = self.total_ticks();
        self.frame = if self.looping {
            frame % total
        } else {
            frame.min(total - 1)
        };
    }

    pub fn current_image(&self) -> Frame {
        self.images[(self.frame / self.frame_duration) as usize]
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn frame_duration(&self) -> u32 {
        self.frame_duration
    }
}
