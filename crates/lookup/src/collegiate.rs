use serde_json::Value;

pub const NO_DICTIONARY_ENTRY: &str = "No dictionary entry found.";

/// One collegiate sense-object reduced to the fields the dashboard renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub headword: String,
    pub part_of_speech: String,
    pub definitions: Vec<String>,
    pub synonyms: Vec<String>,
    pub etymology: String,
    pub first_use: String,
    pub examples: Vec<String>,
}

/// Formats a collegiate response body into markdown, one block per
/// sense-object in source order. The API answers unknown words with a plain
/// array of suggestion strings, so anything but a non-empty array of objects
/// collapses to [`NO_DICTIONARY_ENTRY`].
pub fn format_senses(payload: &Value) -> String {
    let senses = match payload.as_array() {
        Some(list) if list.first().is_some_and(Value::is_object) => list,
        _ => return NO_DICTIONARY_ENTRY.to_string(),
    };
    senses
        .iter()
        .filter_map(Value::as_object)
        .map(|sense| DictionaryEntry::from_sense(sense).to_markdown())
        .collect::<Vec<_>>()
        .join("\n\n")
}

impl DictionaryEntry {
    /// Extracts the renderable fields from one sense-object. Every nested
    /// access is an explicit presence check that falls back to the field's
    /// default; a malformed sub-structure never aborts the other fields.
    pub fn from_sense(sense: &serde_json::Map<String, Value>) -> Self {
        let headword = sense
            .get("hwi")
            .and_then(Value::as_object)
            .and_then(|hwi| hwi.get("hw"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .replace('*', "");
        let part_of_speech = sense
            .get("fl")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();
        let definitions = string_items(sense.get("shortdef"));
        let synonyms = sense
            .get("meta")
            .and_then(Value::as_object)
            .and_then(|meta| meta.get("syns"))
            .and_then(Value::as_array)
            .map(|groups| {
                groups
                    .iter()
                    .filter_map(Value::as_array)
                    .flatten()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let etymology = sense
            .get("et")
            .and_then(Value::as_array)
            .map(|groups| {
                groups
                    .iter()
                    .filter_map(Value::as_array)
                    .map(|tokens| {
                        tokens
                            .iter()
                            .filter_map(Value::as_str)
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();
        let first_use = sense
            .get("date")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();

        Self {
            headword,
            part_of_speech,
            definitions,
            synonyms,
            etymology,
            first_use,
            examples: example_sentences(sense),
        }
    }

    /// Fixed-order markdown block: heading, definitions, synonyms, etymology,
    /// first use, examples.
    pub fn to_markdown(&self) -> String {
        let definitions = if self.definitions.is_empty() {
            "- No definitions found.".to_string()
        } else {
            self.definitions
                .iter()
                .map(|definition| format!("- {definition}"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let synonyms = if self.synonyms.is_empty() {
            "None".to_string()
        } else {
            self.synonyms.join(", ")
        };
        let etymology = if self.etymology.is_empty() {
            "Unknown"
        } else {
            &self.etymology
        };
        let examples = if self.examples.is_empty() {
            "None".to_string()
        } else {
            self.examples
                .iter()
                .map(|example| format!("- _{example}_"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        format!(
            "### {} ({})\n\
             **Definitions:**\n{}\n\n\
             **Synonyms:** {}\n\n\
             **Etymology:** {}\n\n\
             **First Known Use:** {}\n\n\
             **Examples:**\n{}",
            self.headword, self.part_of_speech, definitions, synonyms, etymology, self.first_use,
            examples
        )
    }
}

/// Example sentences live several levels down: `def[0].sseq` holds senses,
/// each sense holds `["sense", {...}]` pairs whose `dt` arrays tag visual
/// illustrations as `["vis", [{"t": ...}]]`. Any absence along the walk
/// degrades to an empty list.
fn example_sentences(sense: &serde_json::Map<String, Value>) -> Vec<String> {
    let mut sentences = Vec::new();
    let Some(sense_sequences) = sense
        .get("def")
        .and_then(Value::as_array)
        .and_then(|defs| defs.first())
        .and_then(Value::as_object)
        .and_then(|def| def.get("sseq"))
        .and_then(Value::as_array)
    else {
        return sentences;
    };

    for sequence in sense_sequences.iter().filter_map(Value::as_array) {
        for sub_sense in sequence {
            let Some(body) = sub_sense
                .as_array()
                .filter(|pair| pair.len() > 1)
                .and_then(|pair| pair[1].as_object())
            else {
                continue;
            };
            let Some(defining_text) = body.get("dt").and_then(Value::as_array) else {
                continue;
            };
            for item in defining_text.iter().filter_map(Value::as_array) {
                if item.first().and_then(Value::as_str) != Some("vis") {
                    continue;
                }
                let Some(quotes) = item.get(1).and_then(Value::as_array) else {
                    continue;
                };
                for quote in quotes.iter().filter_map(Value::as_object) {
                    if let Some(text) = quote.get("t").and_then(Value::as_str) {
                        sentences.push(text.to_string());
                    }
                }
            }
        }
    }
    sentences
}

fn string_items(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
