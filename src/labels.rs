//! User-facing labels and messages in each supported language.

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::params::AspectClass;

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Korean.
    Ko,
}

impl Locale {
    /// Form title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::En => "DALL-E Image Generator",
            Self::Ko => "DALL-E 이미지 생성기",
        }
    }

    /// Surface label of an aspect class.
    #[must_use]
    pub fn aspect(self, aspect: AspectClass) -> &'static str {
        match (self, aspect) {
            (Self::En, AspectClass::Square) => "square",
            (Self::En, AspectClass::Wide) => "wide",
            (Self::En, AspectClass::Tall) => "tall",
            (Self::Ko, AspectClass::Square) => "정사각형",
            (Self::Ko, AspectClass::Wide) => "가로",
            (Self::Ko, AspectClass::Tall) => "세로",
        }
    }

    /// Field label for the API key.
    #[must_use]
    pub fn api_key_field(self) -> &'static str {
        match self {
            Self::En => "OpenAI API key",
            Self::Ko => "OpenAI API 키",
        }
    }

    /// Field label for the prompt.
    #[must_use]
    pub fn prompt_field(self) -> &'static str {
        match self {
            Self::En => "Image description",
            Self::Ko => "이미지 설명",
        }
    }

    /// Field label for the aspect selector.
    #[must_use]
    pub fn aspect_field(self) -> &'static str {
        match self {
            Self::En => "Aspect",
            Self::Ko => "이미지 비율",
        }
    }

    /// Field label for the size selector.
    #[must_use]
    pub fn size_field(self) -> &'static str {
        match self {
            Self::En => "Size",
            Self::Ko => "이미지 크기",
        }
    }

    /// Shown while the provider call is in flight.
    #[must_use]
    pub fn generating(self) -> &'static str {
        match self {
            Self::En => "Generating image with DALL-E...",
            Self::Ko => "DALL-E를 사용하여 이미지 생성 중...",
        }
    }

    /// Caption under a generated image.
    #[must_use]
    pub fn caption(self, prompt: &str) -> String {
        match self {
            Self::En => format!("Generated image: {prompt}"),
            Self::Ko => format!("생성된 이미지: {prompt}"),
        }
    }

    /// The single collapsed message for any provider, fetch or decode failure.
    #[must_use]
    pub fn generation_error(self, detail: &str) -> String {
        match self {
            Self::En => format!("Error during image generation: {detail}"),
            Self::Ko => format!("이미지 생성 중 오류 발생: {detail}"),
        }
    }

    /// Warning for rejected form input.
    #[must_use]
    pub fn form_warning(self, error: &FormError) -> String {
        match self {
            Self::En => error.to_string(),
            Self::Ko => match error {
                FormError::MissingApiKey => "OpenAI API 키를 입력해주세요.".to_string(),
                FormError::MissingPrompt => "이미지 설명을 입력해주세요.".to_string(),
                FormError::SizeMismatch { size, aspect, options } => {
                    let aspect =
                        aspect.parse::<AspectClass>().map_or(aspect.as_str(), |a| self.aspect(a));
                    format!("{size} 크기는 {aspect} 비율에서 사용할 수 없습니다. 선택 가능: {options}")
                }
                FormError::UnknownAspect(label) => {
                    format!("알 수 없는 비율 '{label}'. 선택 가능: 정사각형, 가로, 세로")
                }
                FormError::UnknownSize(size) => format!("알 수 없는 크기 '{size}'"),
            },
        }
    }

    /// Shown when the API key could not be read without echo.
    #[must_use]
    pub fn key_entry_failed(self) -> &'static str {
        match self {
            Self::En => "Could not read the API key from the terminal. Use 'key <api key>' instead.",
            Self::Ko => "터미널에서 API 키를 읽을 수 없습니다. 'key <api key>'를 사용하세요.",
        }
    }

    /// One-shot notice after a delete.
    #[must_use]
    pub fn deleted_notice(self) -> &'static str {
        match self {
            Self::En => "Image deleted.",
            Self::Ko => "이미지가 삭제되었습니다.",
        }
    }

    /// One-shot notice after a successful generation.
    #[must_use]
    pub fn generated_notice(self) -> &'static str {
        match self {
            Self::En => "Image generated.",
            Self::Ko => "이미지가 생성되었습니다.",
        }
    }

    /// Label of the download affordance.
    #[must_use]
    pub fn download(self) -> &'static str {
        match self {
            Self::En => "Download image",
            Self::Ko => "이미지 다운로드",
        }
    }

    /// Shown when there is nothing to download or delete.
    #[must_use]
    pub fn no_image(self) -> &'static str {
        match self {
            Self::En => "No image in this session.",
            Self::Ko => "생성된 이미지가 없습니다.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_messages_match_form_errors() {
        assert_eq!(Locale::En.form_warning(&FormError::MissingApiKey), "Please enter your API key.");
        assert_eq!(
            Locale::En.form_warning(&FormError::MissingPrompt),
            "Please enter an image description."
        );
    }

    #[test]
    fn korean_labels() {
        assert_eq!(Locale::Ko.aspect(AspectClass::Wide), "가로");
        assert_eq!(Locale::Ko.caption("고양이"), "생성된 이미지: 고양이");
        assert_eq!(
            Locale::Ko.form_warning(&FormError::MissingPrompt),
            "이미지 설명을 입력해주세요."
        );
    }

    #[test]
    fn korean_warnings_cover_every_form_error() {
        let mismatch = FormError::SizeMismatch {
            size: "1024x1024".into(),
            aspect: "wide".into(),
            options: "1792x1024, 1024x576".into(),
        };
        assert_eq!(
            Locale::Ko.form_warning(&mismatch),
            "1024x1024 크기는 가로 비율에서 사용할 수 없습니다. 선택 가능: 1792x1024, 1024x576"
        );
        assert_eq!(
            Locale::Ko.form_warning(&FormError::UnknownAspect("round".into())),
            "알 수 없는 비율 'round'. 선택 가능: 정사각형, 가로, 세로"
        );
        assert_eq!(
            Locale::Ko.form_warning(&FormError::UnknownSize("huge".into())),
            "알 수 없는 크기 'huge'"
        );
        assert_eq!(Locale::En.form_warning(&mismatch), mismatch.to_string());
    }

    #[test]
    fn korean_aspect_labels_parse_back() {
        for aspect in [AspectClass::Square, AspectClass::Wide, AspectClass::Tall] {
            let label = Locale::Ko.aspect(aspect);
            assert_eq!(label.parse::<AspectClass>().unwrap(), aspect);
        }
    }

    #[test]
    fn generation_error_wraps_detail() {
        assert_eq!(
            Locale::En.generation_error("Network error: timed out"),
            "Error during image generation: Network error: timed out"
        );
    }
}
