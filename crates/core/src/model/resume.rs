use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::ContentError;

const EMBEDDED_RESUME: &str = include_str!("../../data/resume.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personal {
    pub name: String,
    pub role: String,
    pub email: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub bio: String,
}

/// One job in the career ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    /// Display date range, e.g. "Dec 2024 -- Present".
    pub date: String,
    pub company: String,
    pub role: String,
    pub location: String,
    pub description: Vec<String>,
    #[serde(default)]
    pub technologies: Option<Vec<String>>,
}

impl Experience {
    pub fn technologies(&self) -> &[String] {
        self.technologies.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: String,
    pub date: String,
    pub institution: String,
    pub degree: String,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<String>,
}

/// The whole content document. Loaded once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub personal: Personal,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl Resume {
    /// The document compiled into the binary.
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_json(EMBEDDED_RESUME)
    }

    /// Parse and validate a replacement document.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let resume: Resume = serde_json::from_str(json)?;
        resume.validate()?;
        log::info!(
            "loaded resume: {} jobs, {} schools, {} skills",
            resume.experience.len(),
            resume.education.len(),
            resume.skill_count()
        );
        Ok(resume)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.experience.is_empty() {
            return Err(ContentError::NoExperience);
        }
        let mut seen = HashSet::new();
        for job in &self.experience {
            if !seen.insert(job.id.as_str()) {
                return Err(ContentError::DuplicateExperience(job.id.clone()));
            }
        }
        if self.skill_count() == 0 {
            return Err(ContentError::NoSkills);
        }
        Ok(())
    }

    /// Total number of skill labels across all categories.
    pub fn skill_count(&self) -> usize {
        self.skills.iter().map(|c| c.items.len()).sum()
    }

    /// Every skill label in category order, paired with its category name.
    pub fn flat_skills(&self) -> impl Iterator<Item = (&str, &str)> {
        self.skills.iter().flat_map(|c| {
            c.items
                .iter()
                .map(move |item| (item.as_str(), c.category.as_str()))
        })
    }

    /// Experience at `index`, clamped to the last entry.
    pub fn experience_at(&self, index: usize) -> Option<&Experience> {
        let last = self.experience.len().checked_sub(1)?;
        self.experience.get(index.min(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(experience: &str, skills: &str) -> String {
        format!(
            r#"{{
                "personal": {{"name":"A","role":"B","email":"a@b.c","location":"L",
                              "linkedin":"https://x","github":"gh","bio":"bio"}},
                "experience": {experience},
                "education": [],
                "skills": {skills}
            }}"#
        )
    }

    #[test]
    fn embedded_document_is_valid() {
        let resume = Resume::embedded().unwrap();
        assert_eq!(resume.experience.len(), 5);
        assert_eq!(resume.education.len(), 3);
        assert_eq!(resume.skill_count(), 31);
        assert_eq!(resume.experience[0].company, "eOracle");
        assert_eq!(resume.interests.len(), 8);
    }

    #[test]
    fn rejects_empty_experience() {
        let json = minimal("[]", r#"[{"category":"X","items":["a"]}]"#);
        assert!(matches!(
            Resume::from_json(&json),
            Err(ContentError::NoExperience)
        ));
    }

    #[test]
    fn rejects_duplicate_job_ids() {
        let job = r#"{"id":"j","date":"d","company":"c","role":"r","location":"l","description":[]}"#;
        let json = minimal(
            &format!("[{job},{job}]"),
            r#"[{"category":"X","items":["a"]}]"#,
        );
        match Resume::from_json(&json) {
            Err(ContentError::DuplicateExperience(id)) => assert_eq!(id, "j"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_document_without_skills() {
        let job = r#"{"id":"j","date":"d","company":"c","role":"r","location":"l","description":[]}"#;
        let json = minimal(&format!("[{job}]"), r#"[{"category":"X","items":[]}]"#);
        let err = Resume::from_json(&json).unwrap_err();
        assert!(matches!(err, ContentError::NoSkills));
    }

    #[test]
    fn technologies_are_optional() {
        let job = r#"{"id":"j","date":"d","company":"c","role":"r","location":"l","description":["x"]}"#;
        let json = minimal(&format!("[{job}]"), r#"[{"category":"X","items":["a"]}]"#);
        let resume = Resume::from_json(&json).unwrap();
        assert!(resume.experience[0].technologies().is_empty());
    }

    #[test]
    fn flat_skills_keep_category_order() {
        let resume = Resume::embedded().unwrap();
        let flat: Vec<_> = resume.flat_skills().collect();
        assert_eq!(flat[0], ("Python", "Programming"));
        assert_eq!(
            flat.last().copied(),
            Some(("Spanish (Intermediate)", "Languages"))
        );
    }

    #[test]
    fn experience_at_clamps() {
        let resume = Resume::embedded().unwrap();
        assert_eq!(resume.experience_at(99).unwrap().id, "initiator-vc");
    }
}
