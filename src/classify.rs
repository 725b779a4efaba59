//! Usage classification for forward-declaration candidates.
//!
//! Decides whether every use of a class name inside a header is compatible
//! with a forward declaration (pointer/reference only) or requires the full
//! type definition (by-value member, template argument, base class).
//!
//! This is a whole-file textual heuristic, not a parser. It errs on the
//! side of keeping the real include: a class that is never used, or used in
//! any ambiguous way, is reported as needing the full include.

use regex::Regex;
use std::fmt;

/// What the file actually does with a class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsageEvidence {
    /// `Foo *ptr` style usage.
    pub pointer: bool,
    /// `Foo &ref` style usage.
    pub reference: bool,
    /// `Foo obj;` - a member or local declared by value.
    pub direct: bool,
    /// `vector<Foo>` style template-argument usage.
    pub template: bool,
    /// `: public Foo` style base-class usage.
    pub inheritance: bool,
}

impl UsageEvidence {
    /// True when at least one usage blocks a forward declaration.
    pub fn has_blocker(&self) -> bool {
        self.direct || self.template || self.inheritance
    }
}

impl fmt::Display for UsageEvidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut found = Vec::new();
        if self.pointer {
            found.push("pointer");
        }
        if self.reference {
            found.push("reference");
        }
        if self.direct {
            found.push("direct value");
        }
        if self.template {
            found.push("template arg");
        }
        if self.inheritance {
            found.push("inheritance");
        }
        if found.is_empty() {
            write!(f, "no usage found")
        } else {
            write!(f, "{}", found.join(", "))
        }
    }
}

/// Check whether `class_name` is only ever used through pointers or
/// references in `content`.
///
/// Returns the verdict together with the evidence that produced it. Pure
/// function of its inputs; safe to call on arbitrary text.
pub fn can_forward_declare(content: &str, class_name: &str) -> (bool, UsageEvidence) {
    let class = regex::escape(class_name);

    // Usage that a forward declaration can satisfy.
    let pointer = Regex::new(&format!(r"\b{class}\s*\*")).unwrap();
    let reference = Regex::new(&format!(r"\b{class}\s*&")).unwrap();

    // Usage that needs the full definition.
    let direct = Regex::new(&format!(r"\b{class}\s+\w+;")).unwrap();
    let template = Regex::new(&format!(r"<\s*{class}\s*>")).unwrap();
    let inheritance = Regex::new(&format!(r":\s*(?:public|private|protected)\s+{class}")).unwrap();

    let evidence = UsageEvidence {
        pointer: pointer.is_match(content),
        reference: reference.is_match(content),
        direct: direct.is_match(content),
        template: template.is_match(content),
        inheritance: inheritance.is_match(content),
    };

    let ok = (evidence.pointer || evidence.reference) && !evidence.has_blocker();
    (ok, evidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_only_is_convertible() {
        let (ok, ev) = can_forward_declare("HeaterController* ctrl;", "HeaterController");
        assert!(ok);
        assert!(ev.pointer);
        assert!(!ev.direct);
    }

    #[test]
    fn test_reference_only_is_convertible() {
        let (ok, ev) = can_forward_declare("void attach(HeaterController& c);", "HeaterController");
        assert!(ok);
        assert!(ev.reference);
    }

    #[test]
    fn test_direct_value_blocks_conversion() {
        let content = "HeaterController ctrl;";
        let (ok, ev) = can_forward_declare(content, "HeaterController");
        assert!(!ok);
        assert!(ev.direct);
    }

    #[test]
    fn test_direct_value_anywhere_beats_pointer_elsewhere() {
        let content = "HeaterController* a;\nHeaterController backup;\n";
        let (ok, ev) = can_forward_declare(content, "HeaterController");
        assert!(!ok);
        assert!(ev.pointer);
        assert!(ev.direct);
    }

    #[test]
    fn test_template_argument_blocks_conversion() {
        let content = "std::vector<Screen> screens;\nScreen* active;";
        let (ok, ev) = can_forward_declare(content, "Screen");
        assert!(!ok);
        assert!(ev.template);
    }

    #[test]
    fn test_inheritance_blocks_conversion() {
        let content = "class HeatScreen : public Screen {\n  Screen* parent;\n};";
        let (ok, ev) = can_forward_declare(content, "Screen");
        assert!(!ok);
        assert!(ev.inheritance);
    }

    #[test]
    fn test_no_usage_is_not_convertible() {
        // An include with no visible usage stays: conservative default.
        let (ok, ev) = can_forward_declare("int x = 0;", "Network");
        assert!(!ok);
        assert_eq!(ev, UsageEvidence::default());
    }

    #[test]
    fn test_word_boundary_ignores_longer_names() {
        let (ok, ev) = can_forward_declare("ScreenManager* mgr;", "Screen");
        assert!(!ok);
        assert!(!ev.pointer);
    }

    #[test]
    fn test_spacing_variants() {
        let (ok, _) = can_forward_declare("TempSensor *sensor;", "TempSensor");
        assert!(ok);
        let (ok, _) = can_forward_declare("TempSensor  &sensor", "TempSensor");
        assert!(ok);
    }

    #[test]
    fn test_evidence_display() {
        let ev = UsageEvidence {
            pointer: true,
            direct: true,
            ..Default::default()
        };
        assert_eq!(ev.to_string(), "pointer, direct value");
        assert_eq!(UsageEvidence::default().to_string(), "no usage found");
    }
}
