//! Makefile recipe that turns the documentation into PDF and ODT via pandoc.
//!
//! When the index is a structured artifact, pandoc cannot read it directly:
//! the recipe first runs the concatenation step to materialize one Markdown
//! document, then converts that. A Markdown index is converted as-is.

use mdindex_shared::RecipeConfig;

/// Whether `index_file` names a structured (YAML/JSON) index rather than Markdown.
pub fn is_structured_index(index_file: &str) -> bool {
    let lower = index_file.to_ascii_lowercase();
    [".yaml", ".yml", ".json"]
        .iter()
        .any(|ext| lower.ends_with(ext))
}

/// Render the Makefile.
///
/// `concat_output` is the Markdown file produced from a structured index;
/// it is ignored for a Markdown index.
pub fn emit_build_recipe(
    source_root: &str,
    index_file: &str,
    concat_output: &str,
    recipe: &RecipeConfig,
) -> String {
    let structured = is_structured_index(index_file);
    let pandoc_input = if structured { concat_output } else { index_file };

    let RecipeConfig {
        pandoc,
        filter,
        build_dir,
        document_name,
        tool_command,
    } = recipe;

    let mut out = format!(
        "# Makefile generated by mdindex\n\
         # Builds the documentation as PDF and ODT\n\
         \n\
         SOURCE_DIR = {source_root}\n\
         BUILD_DIR = {build_dir}\n\
         INDEX_FILE = {index_file}\n\
         PANDOC_INPUT = {pandoc_input}\n\
         PANDOC = {pandoc}\n\
         PANDOC_FILTER = {filter}\n\
         \n\
         .PHONY: pdf odt all clean install-deps install-deps-macos help\n\
         \n\
         $(BUILD_DIR):\n\
         \tmkdir -p $(BUILD_DIR)\n\
         \n"
    );

    if structured {
        out.push_str(&format!(
            "# Concatenate the indexed documents in index order\n\
             $(PANDOC_INPUT): $(INDEX_FILE)\n\
             \t{tool_command} -s $(SOURCE_DIR) --concat-yaml $(INDEX_FILE) -o $(PANDOC_INPUT)\n\
             \n"
        ));
    }

    // Only a generated concatenation is safe to delete; a Markdown index is a source.
    let clean_extra = if structured { " $(PANDOC_INPUT)" } else { "" };

    out.push_str(&format!(
        "pdf: $(BUILD_DIR) $(PANDOC_INPUT)\n\
         \t$(PANDOC) $(PANDOC_INPUT) \\\n\
         \t\t--from markdown \\\n\
         \t\t--to pdf \\\n\
         \t\t--output $(BUILD_DIR)/{document_name}.pdf \\\n\
         \t\t--filter $(PANDOC_FILTER) \\\n\
         \t\t--toc \\\n\
         \t\t--number-sections\n\
         \n\
         odt: $(BUILD_DIR) $(PANDOC_INPUT)\n\
         \t$(PANDOC) $(PANDOC_INPUT) \\\n\
         \t\t--from markdown \\\n\
         \t\t--to odt \\\n\
         \t\t--output $(BUILD_DIR)/{document_name}.odt \\\n\
         \t\t--filter $(PANDOC_FILTER) \\\n\
         \t\t--toc\n\
         \n\
         all: pdf odt\n\
         \n\
         clean:\n\
         \trm -rf $(BUILD_DIR){clean_extra}\n\
         \n\
         install-deps:\n\
         \tsudo apt-get update\n\
         \tsudo apt-get install -y pandoc\n\
         \tnpm install --global mermaid-filter\n\
         \n\
         install-deps-macos:\n\
         \tbrew install pandoc\n\
         \tnpm install --global mermaid-filter\n\
         \n\
         help:\n\
         \t@echo \"Available targets:\"\n\
         \t@echo \"  make -f Makefile.docs pdf                - Build PDF\"\n\
         \t@echo \"  make -f Makefile.docs odt                - Build ODT\"\n\
         \t@echo \"  make -f Makefile.docs all                - Build PDF and ODT\"\n\
         \t@echo \"  make -f Makefile.docs clean              - Remove generated files\"\n\
         \t@echo \"  make -f Makefile.docs install-deps       - Install dependencies (Ubuntu/Debian)\"\n\
         \t@echo \"  make -f Makefile.docs install-deps-macos - Install dependencies (macOS)\"\n"
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_index_detection() {
        assert!(is_structured_index("00index.yaml"));
        assert!(is_structured_index("index.YML"));
        assert!(is_structured_index("out/index.json"));
        assert!(!is_structured_index("00index.md"));
        assert!(!is_structured_index("yaml"));
    }

    #[test]
    fn yaml_index_chains_concatenation() {
        let recipe = emit_build_recipe(
            "./docs",
            "00index.yaml",
            "all_docs.md",
            &RecipeConfig::default(),
        );

        assert!(recipe.contains("PANDOC_INPUT = all_docs.md\n"));
        assert!(recipe.contains("$(PANDOC_INPUT): $(INDEX_FILE)\n"));
        assert!(recipe.contains(
            "\tmdindex -s $(SOURCE_DIR) --concat-yaml $(INDEX_FILE) -o $(PANDOC_INPUT)\n"
        ));
        assert!(recipe.contains("\trm -rf $(BUILD_DIR) $(PANDOC_INPUT)\n"));
    }

    #[test]
    fn markdown_index_is_converted_directly() {
        let recipe = emit_build_recipe(
            "./docs",
            "00index.md",
            "all_docs.md",
            &RecipeConfig::default(),
        );

        assert!(recipe.contains("PANDOC_INPUT = 00index.md\n"));
        assert!(!recipe.contains("--concat-yaml"));
        assert!(!recipe.contains("all_docs.md"));
        assert!(recipe.contains("\trm -rf $(BUILD_DIR)\n"));
    }

    #[test]
    fn recipe_uses_configured_tools() {
        let config = RecipeConfig {
            pandoc: "/opt/pandoc/bin/pandoc".into(),
            document_name: "handbook".into(),
            ..RecipeConfig::default()
        };
        let recipe = emit_build_recipe("docs", "00index.yaml", "all_docs.md", &config);

        assert!(recipe.contains("PANDOC = /opt/pandoc/bin/pandoc\n"));
        assert!(recipe.contains("--output $(BUILD_DIR)/handbook.pdf"));
        assert!(recipe.contains("--output $(BUILD_DIR)/handbook.odt"));
        assert!(recipe.contains("PANDOC_FILTER = mermaid-filter\n"));
    }

    #[test]
    fn recipe_targets_use_tabs() {
        let recipe = emit_build_recipe("docs", "00index.yaml", "all_docs.md", &RecipeConfig::default());
        for line in recipe.lines() {
            if line.starts_with(' ') {
                panic!("recipe line indented with spaces: {line:?}");
            }
        }
    }
}
