use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct InvokeRequest<'a> {
    pub inputs: &'a str,
    pub parameters: &'a GenerationParameters,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub do_sample: bool,
    pub repetition_penalty: f32,
    pub return_full_text: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        GenerationParameters {
            max_new_tokens: 512,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 50,
            do_sample: true,
            repetition_penalty: 1.1,
            return_full_text: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InvokeResponse {
    pub generated_text: String,
}
