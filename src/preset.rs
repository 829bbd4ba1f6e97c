/// A starter lintent.yaml
pub struct Preset {
    pub name: &'static str,
    pub content: &'static str,
    /// Command that installs the preset's primary linter
    pub install: &'static str,
}

static PRESETS: [Preset; 2] = [
    Preset {
        name: "python",
        content: include_str!("../presets/python.yaml"),
        install: "pip install ruff",
    },
    Preset {
        name: "typescript",
        content: include_str!("../presets/typescript.yaml"),
        install: "npm install -D eslint",
    },
];

pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name == name)
}
