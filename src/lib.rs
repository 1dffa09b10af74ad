//! Pixgen - Google image generation provider library.
//!
//! Normalizes two structurally different Google backends behind one
//! capability contract: the multimodal Gemini content API (mixed
//! text/image output) and the dedicated Imagen synthesis API. Also derives
//! a descriptive file name for each produced image, degrading to a
//! synthesized name when the naming call fails.
//!
//! The public surface is the [`ports::provider::ImageProvider`] trait and
//! its Google implementation, [`provider::GoogleProvider`]:
//!
//! ```no_run
//! use pixgen::config::Config;
//! use pixgen::ports::{ImageOptions, ImageProvider};
//! use pixgen::provider::GoogleProvider;
//!
//! # async fn demo() -> Result<(), pixgen::error::ProviderError> {
//! let config = Config::load(&pixgen::config::discover_config_path(None))?;
//! let provider = GoogleProvider::new(&config)?;
//! let output = provider.generate("a red fox in snow", &ImageOptions::default()).await?;
//! println!("saved to {}", output.path.display());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod model;
pub mod naming;
pub mod output;
pub mod ports;
pub mod prompts;
pub mod provider;
pub mod response;

pub use error::ProviderError;
pub use model::ModelFamily;
pub use ports::provider::{ImageOptions, ImageOutput, ImageProvider};
pub use provider::GoogleProvider;
