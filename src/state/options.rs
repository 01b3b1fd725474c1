/// Generation options and prompt building
///
/// These values mirror the knobs the generation API accepts. They are
/// serialized to JSON as part of the config file so the last-used options
/// survive a restart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Style presets offered for stylizing an upload
pub const STYLE_PRESETS: &[&str] = &[
    "None",
    "Ghibli",
    "Pixar",
    "Cyberpunk",
    "Watercolor",
    "Oil Painting",
    "Charcoal Sketch",
    "Cartoon",
    "Fantasy Art",
    "Impressionist",
    "Pop Art",
    "3D Render",
    "Photorealistic",
    "Minimalist",
    "Anime",
    "Steampunk",
    "Line Art",
    "Pixel Art",
    "Low Poly",
    "Graffiti",
    "Digital Painting",
];

/// Reduced preset list for text-to-image generation
pub const GENERATE_STYLE_PRESETS: &[&str] = &[
    "None",
    "Ghibli",
    "Pixar",
    "Watercolor",
    "Cyberpunk",
    "Oil Painting",
    "Sketch",
];

/// Background handling for edited images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Auto,
    Transparent,
    Opaque,
}

impl Background {
    pub const ALL: [Background; 3] = [Background::Auto, Background::Transparent, Background::Opaque];

    /// Wire value expected by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Background::Auto => "auto",
            Background::Transparent => "transparent",
            Background::Opaque => "opaque",
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output quality requested from the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Auto,
    High,
    Medium,
    Low,
}

impl Quality {
    pub const ALL: [Quality; 4] = [Quality::Auto, Quality::High, Quality::Medium, Quality::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Auto => "auto",
            Quality::High => "high",
            Quality::Medium => "medium",
            Quality::Low => "low",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output size requested from the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1024x1536")]
    Portrait,
    #[serde(rename = "1536x1024")]
    Landscape,
    #[serde(rename = "auto")]
    Auto,
}

impl ImageSize {
    pub const ALL: [ImageSize; 4] = [
        ImageSize::Square,
        ImageSize::Portrait,
        ImageSize::Landscape,
        ImageSize::Auto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Square => "1024x1024",
            ImageSize::Portrait => "1024x1536",
            ImageSize::Landscape => "1536x1024",
            ImageSize::Auto => "auto",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All options for one generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub background: Background,
    pub quality: Quality,
    pub size: ImageSize,
    /// How many images to generate (1..=10)
    pub count: u8,
    /// Optional user id passed through for abuse monitoring
    #[serde(default)]
    pub user: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            background: Background::Auto,
            quality: Quality::Auto,
            size: ImageSize::Square,
            count: 1,
            user: String::new(),
        }
    }
}

impl GenerationOptions {
    /// The user id, or None when the field was left empty
    pub fn effective_user(&self) -> Option<&str> {
        let trimmed = self.user.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

/// Build the edit prompt for stylizing a single upload.
///
/// A non-empty custom prompt wins outright; otherwise the preset expands to
/// an instruction that preserves the subject, and "None" falls back to a
/// plain enhancement instruction.
pub fn stylize_prompt(style: &str, custom: &str) -> String {
    let custom = custom.trim();
    if !custom.is_empty() {
        return custom.to_string();
    }
    if style != "None" {
        format!(
            "Make this image look like it's in the {} style, but keep the same pose, background, and tattoo placement",
            style
        )
    } else {
        "Enhance this image while keeping the original style, pose, and composition".to_string()
    }
}

/// Build the text-to-image prompt, appending the style suffix when one is set
pub fn generate_prompt(text: &str, style: &str) -> String {
    let text = text.trim();
    if style != "None" {
        format!("{} in {} style", text, style)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = GenerationOptions::default();
        assert_eq!(options.background, Background::Auto);
        assert_eq!(options.quality, Quality::Auto);
        assert_eq!(options.size, ImageSize::Square);
        assert_eq!(options.count, 1);
        assert_eq!(options.effective_user(), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let options = GenerationOptions {
            background: Background::Transparent,
            quality: Quality::High,
            size: ImageSize::Landscape,
            count: 4,
            user: "abuse-watch".into(),
        };

        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"1536x1024\""));
        assert!(json.contains("\"transparent\""));

        let restored: GenerationOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, options);
    }

    #[test]
    fn test_effective_user_trims_whitespace() {
        let mut options = GenerationOptions::default();
        options.user = "  ".into();
        assert_eq!(options.effective_user(), None);
        options.user = " watcher ".into();
        assert_eq!(options.effective_user(), Some("watcher"));
    }

    #[test]
    fn test_stylize_prompt_prefers_custom_text() {
        let prompt = stylize_prompt("Ghibli", "  melt the city into glass  ");
        assert_eq!(prompt, "melt the city into glass");
    }

    #[test]
    fn test_stylize_prompt_expands_preset() {
        let prompt = stylize_prompt("Ghibli", "");
        assert_eq!(
            prompt,
            "Make this image look like it's in the Ghibli style, but keep the same pose, background, and tattoo placement"
        );
    }

    #[test]
    fn test_stylize_prompt_none_enhances() {
        let prompt = stylize_prompt("None", "");
        assert_eq!(
            prompt,
            "Enhance this image while keeping the original style, pose, and composition"
        );
    }

    #[test]
    fn test_generate_prompt_style_suffix() {
        assert_eq!(generate_prompt(" a red fox ", "Watercolor"), "a red fox in Watercolor style");
        assert_eq!(generate_prompt("a red fox", "None"), "a red fox");
    }
}
