use anyhow::Context;
use anyhow::Result;
use glob::Pattern;

use crate::hub_api::Sibling;

/// Weights, configs and tokenizer files, everything else in a repo is skipped.
pub const DEFAULT_ALLOW_PATTERNS: [&str; 6] = ["*.json", "*.safetensors", "*.pt", "*.txt", "*.model", "*.tiktoken"];

#[derive(Debug)]
pub struct AllowList {
    patterns: Vec<Pattern>,
}

impl AllowList {
    pub fn new(patterns: &[&str]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| Pattern::new(pattern).with_context(|| format!("invalid allow pattern, pattern={pattern}")))
            .collect::<Result<Vec<_>>>()?;
        Ok(AllowList { patterns })
    }

    // `*` crosses `/`, so nested files match on extension alone
    pub fn allows(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(path))
    }

    pub fn select<'a>(&self, siblings: &'a [Sibling]) -> Vec<&'a Sibling> {
        siblings.iter().filter(|sibling| self.allows(&sibling.rfilename)).collect()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        AllowList {
            patterns: DEFAULT_ALLOW_PATTERNS
                .iter()
                .filter_map(|pattern| Pattern::new(pattern).ok())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sibling(name: &str) -> Sibling {
        Sibling {
            rfilename: name.to_string(),
            size: None,
        }
    }

    #[test]
    fn select_keeps_weights_configs_and_tokenizers() {
        let siblings: Vec<Sibling> = [
            "config.json",
            "model-00001-of-00002.safetensors",
            "model.safetensors.index.json",
            "pytorch_model.bin",
            "consolidated.pth",
            "original/consolidated.00.pth",
            "original/params.json",
            "tokenizer.model",
            "tokenizer.json",
            "merges.txt",
            "qwen.tiktoken",
            "training_args.pt",
            "model.gguf",
            "README.md",
            ".gitattributes",
            "flax_model.msgpack",
            "onnx/model.onnx",
        ]
        .into_iter()
        .map(sibling)
        .collect();

        let selected: Vec<&str> = AllowList::default()
            .select(&siblings)
            .into_iter()
            .map(|sibling| sibling.rfilename.as_str())
            .collect();

        assert_eq!(
            selected,
            vec![
                "config.json",
                "model-00001-of-00002.safetensors",
                "model.safetensors.index.json",
                "original/params.json",
                "tokenizer.model",
                "tokenizer.json",
                "merges.txt",
                "qwen.tiktoken",
                "training_args.pt",
            ]
        );
    }

    #[test]
    fn allows_is_case_sensitive() {
        let allow_list = AllowList::default();
        assert!(!allow_list.allows("CONFIG.JSON"));
        assert!(allow_list.allows("config.json"));
    }

    #[test]
    fn new_rejects_invalid_pattern() {
        assert!(AllowList::new(&["[*.json"]).is_err());
        assert!(AllowList::new(&["*.bin"]).unwrap().allows("pytorch_model.bin"));
    }
}
