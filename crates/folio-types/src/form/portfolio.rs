use super::{Attachment, FormPart, ResourceForm, publish_flag};
use crate::domain::Portfolio;

/// Create/edit form of a portfolio project.
///
/// `technologies` keeps the raw comma-separated input; it is split only when
/// the form is serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioForm {
    pub title: String,
    pub description: String,
    pub live_url: String,
    pub github_url: String,
    pub technologies: String,
    pub category: String,
    pub is_published: bool,
    pub image: Option<Attachment>,
    pub current_image: Option<String>,
}

impl PortfolioForm {
    pub fn technology_list(&self) -> Vec<String> {
        split_technologies(&self.technologies)
    }
}

/// `"React, Node.js,  TypeScript,"` -> `["React", "Node.js", "TypeScript"]`
pub fn split_technologies(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

impl ResourceForm for PortfolioForm {
    type Resource = Portfolio;

    fn from_resource(p: &Portfolio) -> Self {
        Self {
            title: p.title.clone(),
            description: p.description.clone(),
            live_url: p.live_url.clone(),
            github_url: p.github_url.clone(),
            technologies: p.technologies.join(", "),
            category: p.category.clone(),
            is_published: p.is_published,
            image: None,
            current_image: p.image.clone().filter(|s| !s.is_empty()),
        }
    }

    fn to_parts(&self) -> Vec<FormPart> {
        let mut parts = vec![
            FormPart::text("title", &self.title),
            FormPart::text("description", &self.description),
        ];
        if !self.live_url.is_empty() {
            parts.push(FormPart::text("liveUrl", &self.live_url));
        }
        if !self.github_url.is_empty() {
            parts.push(FormPart::text("githubUrl", &self.github_url));
        }
        for tech in self.technology_list() {
            parts.push(FormPart::text("technologies", tech));
        }
        if !self.category.is_empty() {
            parts.push(FormPart::text("category", &self.category));
        }
        if let Some(image) = &self.image {
            parts.push(FormPart::File {
                name: "image",
                attachment: image.clone(),
            });
        }
        parts.push(publish_flag(self.is_published));
        parts
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn attachment(&self) -> Option<&Attachment> {
        self.image.as_ref()
    }

    fn attach(&mut self, attachment: Attachment) {
        self.image = Some(attachment);
    }

    fn current_image(&self) -> Option<&str> {
        self.current_image.as_deref()
    }
}
