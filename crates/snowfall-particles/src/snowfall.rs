//! The snowfall view: owns the flakes and reacts to host lifecycle callbacks

use crate::config::SnowfallConfig;
use crate::randomizer::Randomizer;
use crate::snowflake::{Snowflake, SnowflakeParams};
use crate::sprite::Sprite;
use crate::surface::{FrameScheduler, Surface};
use std::sync::Arc;

/// Host visibility states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Invisible,
    Gone,
}

/// A fixed-size set of independently simulated snowflakes
pub struct Snowfall {
    config: SnowfallConfig,
    image: Option<Arc<Sprite>>,
    rng: Randomizer,
    snowflakes: Vec<Snowflake>,
    width: u32,
    height: u32,
    visibility: Visibility,
    edit_mode: bool,
    sized: bool,
}

impl Snowfall {
    pub fn new(config: SnowfallConfig, image: Option<Sprite>) -> Self {
        Self::with_randomizer(config, image, Randomizer::new())
    }

    /// Reproducible snowfall: every flake's sampler is derived from `seed`
    pub fn with_seed(config: SnowfallConfig, image: Option<Sprite>, seed: u64) -> Self {
        Self::with_randomizer(config, image, Randomizer::seeded(seed))
    }

    fn with_randomizer(config: SnowfallConfig, image: Option<Sprite>, rng: Randomizer) -> Self {
        Self {
            config,
            image: image.map(Arc::new),
            rng,
            snowflakes: Vec::new(),
            width: 0,
            height: 0,
            visibility: Visibility::Visible,
            edit_mode: false,
            sized: false,
        }
    }

    /// Build a view from config, loading the configured sprite if any
    pub fn from_config(config: SnowfallConfig, seed: Option<u64>) -> snowfall_core::Result<Self> {
        let image = match &config.image {
            Some(path) => Some(Sprite::open(path)?),
            None => {
                log::debug!("No snowflake image configured, drawing circles");
                None
            }
        };
        Ok(match seed {
            Some(seed) => Self::with_seed(config, image, seed),
            None => Self::new(config, image),
        })
    }

    /// Layout editors draw nothing
    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.edit_mode = edit_mode;
    }

    /// Rebuild every flake for the new canvas bounds
    pub fn on_size_changed(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.sized = true;
        self.snowflakes = self.create_snowflakes();
        log::debug!(
            "Rebuilt {} snowflakes for {}x{} canvas",
            self.snowflakes.len(),
            width,
            height
        );
    }

    pub fn on_visibility_changed(&mut self, visibility: Visibility) {
        if visibility == self.visibility {
            return;
        }
        log::info!("Snowfall visibility {:?} -> {:?}", self.visibility, visibility);
        self.visibility = visibility;
        if visibility == Visibility::Gone {
            for snowflake in &mut self.snowflakes {
                snowflake.reset(None);
            }
        }
    }

    /// Draw every flake, then queue an update pass and the next frame
    pub fn on_draw(&mut self, surface: &mut dyn Surface, scheduler: &mut dyn FrameScheduler) {
        // no canvas bounds yet, nothing to animate
        if self.edit_mode || !self.sized || !self.is_shown() {
            return;
        }
        for snowflake in &self.snowflakes {
            snowflake.draw(surface);
        }
        scheduler.post(Box::new(|view: &mut Snowfall| view.advance()));
        scheduler.request_frame();
    }

    /// Advance every flake by one frame
    pub fn advance(&mut self) {
        for snowflake in &mut self.snowflakes {
            snowflake.update();
        }
    }

    pub fn is_shown(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn config(&self) -> &SnowfallConfig {
        &self.config
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn snowflakes(&self) -> &[Snowflake] {
        &self.snowflakes
    }

    pub fn snowflakes_mut(&mut self) -> &mut [Snowflake] {
        &mut self.snowflakes
    }

    pub fn len(&self) -> usize {
        self.snowflakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snowflakes.is_empty()
    }

    fn create_snowflakes(&mut self) -> Vec<Snowflake> {
        let params = Arc::new(SnowflakeParams {
            canvas_width: clamp_dimension(self.width),
            canvas_height: clamp_dimension(self.height),
            image: self.image.clone(),
            alpha_min: self.config.alpha_min,
            alpha_max: self.config.alpha_max,
            angle_max: self.config.angle_max,
            size_min_px: self.config.size_min_px(),
            size_max_px: self.config.size_max_px(),
            speed_min: self.config.speed_min,
            speed_max: self.config.speed_max,
            fading_enabled: self.config.fading_enabled,
            already_falling: self.config.already_falling,
            color: self.config.paint_color(),
        });

        (0..self.config.snowflakes_num)
            .map(|_| Snowflake::new(Arc::clone(&params), Randomizer::seeded(self.rng.next_seed())))
            .collect()
    }
}

fn clamp_dimension(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
