//! Request adaptation between caller images and the Gemini API.

use crate::ai::{ApiResponse, ContentPart, GeminiImageClient, GenerationService};
use crate::config::{resolve_api_key, Config};
use crate::image::{decode_base64_image, decode_image_bytes, to_content_part, InputImage};
use crate::output::OutputStore;
use crate::{Error, Result};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of one edit request. Exactly one artifact is produced.
#[derive(Debug)]
pub enum EditOutcome {
    Image { image: DynamicImage, path: PathBuf },
    Text { path: PathBuf },
}

impl EditOutcome {
    pub fn path(&self) -> &Path {
        match self {
            EditOutcome::Image { path, .. } | EditOutcome::Text { path } => path,
        }
    }

    /// The `(image-or-none, path)` pair handed back to a host.
    pub fn into_pair(self) -> (Option<DynamicImage>, PathBuf) {
        match self {
            EditOutcome::Image { image, path } => (Some(image), path),
            EditOutcome::Text { path } => (None, path),
        }
    }
}

/// Turns images and a prompt into one Gemini call and persists the result.
pub struct RequestAdapter {
    service: Box<dyn GenerationService>,
    store: OutputStore,
    model: String,
    fallback_api_key: Option<String>,
}

impl RequestAdapter {
    /// Build an adapter from concrete dependencies.
    ///
    /// `fallback_api_key` is used when a request carries no explicit key.
    pub fn with_services(
        service: Box<dyn GenerationService>,
        store: OutputStore,
        model: String,
        fallback_api_key: Option<String>,
    ) -> Self {
        Self {
            service,
            store,
            model,
            fallback_api_key,
        }
    }

    /// Construct an adapter talking to the real Gemini endpoint.
    pub fn from_config(config: &Config) -> Self {
        Self::with_services(
            Box::new(GeminiImageClient::from_config(config)),
            OutputStore::new(&config.output_root),
            config.model.clone(),
            config.gemini_api_key.clone(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn process(
        &self,
        images: Vec<InputImage>,
        prompt: &str,
        api_key: Option<&str>,
    ) -> Result<EditOutcome> {
        if prompt.trim().is_empty() {
            return Err(Error::Configuration("Prompt cannot be empty".to_string()));
        }
        let api_key = resolve_api_key(api_key, self.fallback_api_key.as_deref())?;

        let contents = build_contents(images, prompt)?;
        info!(
            "Submitting {} image(s) and prompt to {}",
            contents.len() - 1,
            self.model
        );

        let response = self
            .service
            .generate_content(&api_key, &self.model, &contents)
            .await?;

        let image = match response {
            ApiResponse::Image(bytes) => {
                debug!("Response carried a direct image payload ({} bytes)", bytes.len());
                decode_image_bytes(&bytes)?
            }
            ApiResponse::Parts(parts) => {
                let part = ApiResponse::first_image_part(&parts).ok_or(Error::NoOutput)?;
                debug!("Selected {} part from {} typed part(s)", part.mime_type, parts.len());
                decode_base64_image(&part.data)?
            }
            ApiResponse::Text(text) => {
                info!("Gemini returned text only; writing fallback file");
                let path = self.store.save_text(&text).await?;
                return Ok(EditOutcome::Text { path });
            }
            ApiResponse::Empty => return Err(Error::NoOutput),
        };

        let path = self.store.save_image(&image).await?;
        Ok(EditOutcome::Image { image, path })
    }
}

/// Normalize and encode `images`, then append the prompt as the final part.
pub fn build_contents(images: Vec<InputImage>, prompt: &str) -> Result<Vec<ContentPart>> {
    let mut contents = images
        .into_iter()
        .map(|input| to_content_part(&input.into_canonical()?))
        .collect::<Result<Vec<_>>>()?;
    contents.push(ContentPart::Text(prompt.to_string()));
    Ok(contents)
}
