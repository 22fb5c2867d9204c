use super::{Attachment, FormPart, ResourceForm, publish_flag};
use crate::domain::Blog;

/// Create/edit form of a blog post
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogForm {
    pub title: String,
    pub content: String,
    pub is_published: bool,
    pub image: Option<Attachment>,
    pub current_image: Option<String>,
}

impl ResourceForm for BlogForm {
    type Resource = Blog;

    fn from_resource(blog: &Blog) -> Self {
        Self {
            title: blog.title.clone(),
            content: blog.content.clone(),
            is_published: blog.is_published,
            image: None,
            current_image: blog.image.clone().filter(|s| !s.is_empty()),
        }
    }

    fn to_parts(&self) -> Vec<FormPart> {
        let mut parts = vec![
            FormPart::text("title", &self.title),
            FormPart::text("content", &self.content),
            publish_flag(self.is_published),
        ];
        if let Some(image) = &self.image {
            parts.push(FormPart::File {
                name: "image",
                attachment: image.clone(),
            });
        }
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
