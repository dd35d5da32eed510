pub mod client;
pub mod image;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::client::GeminiHttpClient;
pub use self::image::GeminiImageClient;
