//! Whisper backend for the `Transcriber` trait.
//!
//! The model is loaded once when the transcriber is constructed and reused
//! for every chunk of the run; each call gets a fresh inference state.
//! Building the real backend needs cmake, so it sits behind the `whisper`
//! feature (on by default) with a stub that fails at transcribe time.

use crate::defaults;
use crate::error::{ChunkscribeError, Result};
use crate::stt::transcriber::Transcriber;
use std::path::PathBuf;

#[cfg(feature = "whisper")]
use std::sync::{Mutex, Once};
#[cfg(feature = "whisper")]
use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, install_logging_hooks,
};

// Routes whisper.cpp's own chatter through the log facade instead of stderr.
#[cfg(feature = "whisper")]
static WHISPER_LOG_HOOKS: Once = Once::new();

/// Settings for loading and running a Whisper model.
#[derive(Debug, Clone)]
pub struct WhisperConfig {
    pub model_path: PathBuf,
    /// Language code, or "auto" for detection.
    pub language: String,
    /// Inference threads; `None` lets whisper.cpp decide.
    pub threads: Option<usize>,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(defaults::MODELS_DIR)
                .join(format!("ggml-{}.bin", defaults::DEFAULT_MODEL)),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            threads: None,
        }
    }
}

impl WhisperConfig {
    /// Config pointing at a named model in the local models directory.
    pub fn for_model(name: &str) -> Self {
        Self {
            model_path: PathBuf::from(defaults::MODELS_DIR).join(format!("ggml-{}.bin", name)),
            ..Self::default()
        }
    }
}

fn model_name_of(config: &WhisperConfig) -> String {
    config
        .model_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Transcriber backed by a whisper.cpp model.
///
/// The context lives behind a `Mutex`: the pipeline itself is sequential,
/// but `Transcriber` requires `Sync`.
#[cfg(feature = "whisper")]
pub struct WhisperTranscriber {
    context: Mutex<WhisperContext>,
    config: WhisperConfig,
    model_name: String,
}

#[cfg(feature = "whisper")]
impl std::fmt::Debug for WhisperTranscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperTranscriber")
            .field("config", &self.config)
            .field("model_name", &self.model_name)
            .field("context", &"<WhisperContext>")
            .finish()
    }
}

/// Stub used when the crate is built without the `whisper` feature.
#[cfg(not(feature = "whisper"))]
#[derive(Debug)]
pub struct WhisperTranscriber {
    config: WhisperConfig,
    model_name: String,
}

#[cfg(feature = "whisper")]
impl WhisperTranscriber {
    /// Load the model named by `config`.
    ///
    /// # Errors
    /// `ModelNotFound` when the model file is absent, `ModelLoad` when
    /// whisper.cpp rejects it.
    pub fn new(config: WhisperConfig) -> Result<Self> {
        WHISPER_LOG_HOOKS.call_once(|| {
            install_logging_hooks();
        });

        if !config.model_path.exists() {
            return Err(ChunkscribeError::ModelNotFound {
                path: config.model_path.to_string_lossy().to_string(),
            });
        }

        let model_name = model_name_of(&config);

        let path_str = config
            .model_path
            .to_str()
            .ok_or_else(|| ChunkscribeError::ModelLoad {
                message: format!("model path is not UTF-8: {}", config.model_path.display()),
            })?;
        let context = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
            .map_err(|e| ChunkscribeError::ModelLoad {
                message: format!("whisper rejected {}: {}", config.model_path.display(), e),
            })?;

        log::info!("loaded whisper model '{}'", model_name);
        Ok(Self {
            context: Mutex::new(context),
            config,
            model_name,
        })
    }

    pub fn config(&self) -> &WhisperConfig {
        &self.config
    }

    // whisper.cpp wants f32 in [-1.0, 1.0].
    fn pcm_to_f32(samples: &[i16]) -> Vec<f32> {
        samples.iter().map(|&s| s as f32 / 32768.0).collect()
    }
}

#[cfg(not(feature = "whisper"))]
impl WhisperTranscriber {
    pub fn new(config: WhisperConfig) -> Result<Self> {
        if !config.model_path.exists() {
            return Err(ChunkscribeError::ModelNotFound {
                path: config.model_path.to_string_lossy().to_string(),
            });
        }

        let model_name = model_name_of(&config);
        Ok(Self { config, model_name })
    }

    pub fn config(&self) -> &WhisperConfig {
        &self.config
    }
}

#[cfg(feature = "whisper")]
impl Transcriber for WhisperTranscriber {
    fn transcribe(&self, audio: &[i16]) -> Result<String> {
        let audio_f32 = Self::pcm_to_f32(audio);

        let context = self
            .context
            .lock()
            .map_err(|e| ChunkscribeError::Transcription {
                message: format!("whisper context lock poisoned: {}", e),
            })?;

        // Fresh state per chunk; the weights themselves are shared.
        let mut state = context
            .create_state()
            .map_err(|e| ChunkscribeError::Transcription {
                message: format!("failed to create whisper state: {}", e),
            })?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

        if self.config.language == defaults::AUTO_LANGUAGE {
            params.set_language(None);
        } else {
            params.set_language(Some(&self.config.language));
        }

        if let Some(threads) = self.config.threads {
            params.set_n_threads(threads as i32);
        }

        // Keep whisper.cpp quiet; progress is reported by our own bars.
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        state
            .full(params, &audio_f32)
            .map_err(|e| ChunkscribeError::Transcription {
                message: format!("whisper inference failed: {}", e),
            })?;

        let mut text = String::new();
        for segment in state.as_iter() {
            text.push_str(&segment.to_string());
        }

        Ok(text.trim().to_string())
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        true
    }
}

#[cfg(not(feature = "whisper"))]
impl Transcriber for WhisperTranscriber {
    fn transcribe(&self, _audio: &[i16]) -> Result<String> {
        Err(ChunkscribeError::Transcription {
            message: "built without the 'whisper' feature; rebuild with default features \
                      (needs cmake) to enable speech recognition"
                .to_string(),
        })
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        false
    }
}
