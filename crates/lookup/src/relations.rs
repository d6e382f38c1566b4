use std::collections::HashMap;

use serde::Deserialize;

/// Decoded WordsAPI response body. `results` is absent for unknown words and
/// for error payloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WordRelations {
    pub word: Option<String>,
    pub results: Option<Vec<WordEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub type_of: Vec<String>,
    #[serde(default)]
    pub has_types: Vec<String>,
    #[serde(default)]
    pub has_instances: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    #[serde(default)]
    pub derivation: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

impl WordEntry {
    pub fn part_of_speech(&self) -> &str {
        self.part_of_speech.as_deref().unwrap_or("unknown")
    }

    /// The relation arrays in display order, under their source payload keys.
    fn relation_groups(&self) -> [(&'static str, &[String]); 7] {
        [
            ("synonyms", &self.synonyms),
            ("typeOf", &self.type_of),
            ("hasTypes", &self.has_types),
            ("hasInstances", &self.has_instances),
            ("antonyms", &self.antonyms),
            ("derivation", &self.derivation),
            ("examples", &self.examples),
        ]
    }
}

/// Ordered association from part of speech to its entries. Keys keep
/// first-seen order and entries keep source order; the map is only a lookup
/// index into the ordered list.
#[derive(Debug, Default)]
pub struct GroupedEntries {
    groups: Vec<(String, Vec<WordEntry>)>,
    index: HashMap<String, usize>,
}

impl GroupedEntries {
    pub fn from_entries(entries: &[WordEntry]) -> Self {
        let mut grouped = Self::default();
        for entry in entries {
            grouped.push(entry.clone());
        }
        grouped
    }

    fn push(&mut self, entry: WordEntry) {
        let key = entry.part_of_speech().to_lowercase();
        match self.index.get(&key) {
            Some(&slot) => self.groups[slot].1.push(entry),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![entry]));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[WordEntry])> {
        self.groups
            .iter()
            .map(|(pos, entries)| (pos.as_str(), entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// One node of the rendered definition hierarchy. `allow_expand` is a
/// rendering hint: nodes without children must not present as expandable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
    pub allow_expand: bool,
}

impl TreeNode {
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
            allow_expand: false,
        }
    }

    pub fn branch(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        let allow_expand = !children.is_empty();
        Self {
            label: label.into(),
            children,
            allow_expand,
        }
    }
}

/// Builds the grouped definition tree for a relations payload: one root per
/// part of speech, one child per definition labeled `n1`/`v2`/…, and one
/// sub-group per non-empty relation array.
pub fn definition_tree(relations: &WordRelations) -> Vec<TreeNode> {
    let entries = match &relations.results {
        Some(results) if !results.is_empty() => results,
        _ => return vec![TreeNode::leaf("No definitions found.")],
    };

    let grouped = GroupedEntries::from_entries(entries);
    let mut roots = Vec::with_capacity(grouped.len());
    for (pos, entries) in grouped.iter() {
        let prefix: String = pos.chars().take(1).collect();
        let children = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let sections = entry
                    .relation_groups()
                    .into_iter()
                    .filter(|(_, values)| !values.is_empty())
                    .map(|(key, values)| {
                        let items = values.iter().map(|value| TreeNode::leaf(value.clone()));
                        TreeNode::branch(relation_label(key), items.collect())
                    })
                    .collect();
                TreeNode::branch(
                    format!("{prefix}{}: {}", index + 1, entry.definition),
                    sections,
                )
            })
            .collect();
        roots.push(TreeNode::branch(capitalize(pos), children));
    }
    roots
}

/// Human-readable label for a relation key.
fn relation_label(key: &str) -> String {
    match key {
        "typeOf" => "Type of".to_string(),
        "hasTypes" => "Has Types".to_string(),
        "hasInstances" => "Has Instances".to_string(),
        other => capitalize(other),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pos: Option<&str>, definition: &str) -> WordEntry {
        WordEntry {
            part_of_speech: pos.map(str::to_string),
            definition: definition.to_string(),
            ..WordEntry::default()
        }
    }

    fn relations(results: Option<Vec<WordEntry>>) -> WordRelations {
        WordRelations {
            word: Some("test".to_string()),
            results,
        }
    }

    #[test]
    fn absent_results_yield_single_leaf() {
        let tree = definition_tree(&relations(None));
        assert_eq!(tree, vec![TreeNode::leaf("No definitions found.")]);
        assert!(!tree[0].allow_expand);
    }

    #[test]
    fn empty_results_yield_single_leaf() {
        let tree = definition_tree(&relations(Some(Vec::new())));
        assert_eq!(tree, vec![TreeNode::leaf("No definitions found.")]);
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let tree = definition_tree(&relations(Some(vec![
            entry(Some("noun"), "first"),
            entry(Some("verb"), "second"),
            entry(Some("noun"), "third"),
        ])));
        let labels: Vec<&str> = tree.iter().map(|node| node.label.as_str()).collect();
        assert_eq!(labels, vec!["Noun", "Verb"]);
        let noun_children: Vec<&str> = tree[0]
            .children
            .iter()
            .map(|node| node.label.as_str())
            .collect();
        assert_eq!(noun_children, vec!["n1: first", "n2: third"]);
        assert_eq!(tree[1].children[0].label, "v1: second");
    }

    #[test]
    fn missing_part_of_speech_defaults_to_unknown() {
        let tree = definition_tree(&relations(Some(vec![entry(None, "a mystery")])));
        assert_eq!(tree[0].label, "Unknown");
        assert_eq!(tree[0].children[0].label, "u1: a mystery");
    }

    #[test]
    fn relation_sections_keep_declared_order_and_skip_empty() {
        let mut first = entry(Some("noun"), "a feline");
        first.has_types = vec!["tabby".to_string(), "tomcat".to_string()];
        first.synonyms = vec!["kitty".to_string()];
        let tree = definition_tree(&relations(Some(vec![first])));

        let sections: Vec<&str> = tree[0].children[0]
            .children
            .iter()
            .map(|node| node.label.as_str())
            .collect();
        assert_eq!(sections, vec!["Synonyms", "Has Types"]);
        let values: Vec<&str> = tree[0].children[0].children[1]
            .children
            .iter()
            .map(|node| node.label.as_str())
            .collect();
        assert_eq!(values, vec!["tabby", "tomcat"]);
    }

    #[test]
    fn relation_labels_match_payload_keys() {
        assert_eq!(relation_label("typeOf"), "Type of");
        assert_eq!(relation_label("hasTypes"), "Has Types");
        assert_eq!(relation_label("hasInstances"), "Has Instances");
        assert_eq!(relation_label("synonyms"), "Synonyms");
        assert_eq!(relation_label("derivation"), "Derivation");
    }

    #[test]
    fn entries_without_relations_are_not_expandable() {
        let tree = definition_tree(&relations(Some(vec![entry(Some("noun"), "bare")])));
        let definition = &tree[0].children[0];
        assert!(definition.children.is_empty());
        assert!(!definition.allow_expand);
        assert!(tree[0].allow_expand);
    }

    #[test]
    fn tree_build_is_idempotent() {
        let payload = relations(Some(vec![
            entry(Some("noun"), "first"),
            entry(Some("verb"), "second"),
        ]));
        assert_eq!(definition_tree(&payload), definition_tree(&payload));
    }

    #[test]
    fn payload_deserializes_with_camel_case_arrays() {
        let payload: WordRelations = serde_json::from_str(
            r#"{
                "word": "cat",
                "results": [
                    {
                        "partOfSpeech": "noun",
                        "definition": "feline mammal",
                        "typeOf": ["feline"],
                        "hasTypes": ["domestic cat"]
                    }
                ]
            }"#,
        )
        .unwrap();
        let results = payload.results.as_deref().unwrap();
        assert_eq!(results[0].part_of_speech(), "noun");
        assert_eq!(results[0].type_of, vec!["feline"]);
        assert_eq!(results[0].has_types, vec!["domestic cat"]);
        assert!(results[0].synonyms.is_empty());
    }
}
