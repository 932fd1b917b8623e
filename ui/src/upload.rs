//! Image uploads to the external image host.
//!
//! Forms with a file field upload the picked image first and submit the
//! host's answer (name, public id, url) as the field's value.

use anyhow::{Context, anyhow};
use base64::{Engine as _, engine::general_purpose};
use futures::channel::oneshot;
use payloads::Image;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use web_sys::{Event, File, FileReader};

/// Largest image accepted, in bytes.
pub const MAX_IMAGE_SIZE: f64 = 2.0 * 1024.0 * 1024.0;

#[derive(Deserialize)]
struct HostedImage {
    public_id: String,
    secure_url: String,
    #[serde(default)]
    original_filename: Option<String>,
}

pub async fn upload_image(file: File) -> anyhow::Result<Image> {
    let url = option_env!("IMAGE_UPLOAD_URL")
        .ok_or_else(|| anyhow!("Image uploads are not configured"))?;
    if file.size() > MAX_IMAGE_SIZE {
        return Err(anyhow!(
            "{} is too large ({:.1}MB). The limit is 2MB.",
            file.name(),
            file.size() / 1_048_576.0
        ));
    }

    let bytes = read_file(&file).await?;
    let mime = match file.type_() {
        t if t.is_empty() => "image/jpeg".to_string(),
        t => t,
    };
    let data_url = format!(
        "data:{mime};base64,{}",
        general_purpose::STANDARD.encode(&bytes)
    );

    let body = serde_json::json!({
        "file": data_url,
        "upload_preset": option_env!("IMAGE_UPLOAD_PRESET").unwrap_or("staffdesk"),
    });
    tracing::debug!(name = %file.name(), size = bytes.len(), "uploading image");
    let response = reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .context("Could not reach the image host")?;
    if !response.status().is_success() {
        return Err(anyhow!("The image host refused {}", file.name()));
    }
    let hosted: HostedImage = response
        .json()
        .await
        .context("Unexpected answer from the image host")?;

    Ok(Image {
        name: hosted.original_filename.unwrap_or_else(|| file.name()),
        public_id: hosted.public_id,
        url: hosted.secure_url,
    })
}

/// The whole file, read through a `FileReader`.
async fn read_file(file: &File) -> anyhow::Result<Vec<u8>> {
    let reader =
        FileReader::new().map_err(|_| anyhow!("Files can't be read here"))?;
    let (done, finished) = oneshot::channel::<Option<String>>();
    let mut done = Some(done);

    // loadend follows load, error and abort alike
    let onloadend = {
        let reader = reader.clone();
        Closure::wrap(Box::new(move |_: Event| {
            if let Some(done) = done.take() {
                let error = reader.error().map(|e| e.message());
                if done.send(error).is_err() {
                    tracing::debug!("file read finished after its reader was dropped");
                }
            }
        }) as Box<dyn FnMut(_)>)
    };
    reader.set_onloadend(Some(onloadend.as_ref().unchecked_ref()));
    reader
        .read_as_array_buffer(file)
        .map_err(|_| anyhow!("Could not read {}", file.name()))?;

    let error = finished
        .await
        .map_err(|_| anyhow!("Reading {} was interrupted", file.name()))?;
    reader.set_onloadend(None);
    finished_read(&file.name(), error)?;

    let result = reader
        .result()
        .map_err(|_| anyhow!("Could not read {}", file.name()))?;
    Ok(js_sys::Uint8Array::new(&result).to_vec())
}

/// Turn the reader's error, if any, into the message the user sees.
fn finished_read(name: &str, error: Option<String>) -> anyhow::Result<()> {
    match error {
        None => Ok(()),
        Some(e) if e.is_empty() => Err(anyhow!("Could not read {name}")),
        Some(e) => Err(anyhow!("Could not read {name}: {e}")),
    }
}

/// Read a text file, such as a CSV picked for import.
pub async fn read_text(file: &File) -> anyhow::Result<String> {
    let bytes = read_file(file).await?;
    String::from_utf8(bytes).context("The file is not valid text")
}

#[cfg(test)]
mod tests {
    use super::finished_read;

    #[test]
    fn failed_or_aborted_reads_are_errors() {
        assert!(finished_read("cv.png", None).is_ok());
        let aborted = finished_read("cv.png", Some("The operation was aborted.".into()));
        assert_eq!(
            aborted.unwrap_err().to_string(),
            "Could not read cv.png: The operation was aborted."
        );
        let unnamed = finished_read("cv.png", Some(String::new()));
        assert_eq!(unnamed.unwrap_err().to_string(), "Could not read cv.png");
    }
}
