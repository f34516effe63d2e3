//! Client-side form validation.
//!
//! Mutation services only accept [`Validated`] payloads, so a request that
//! breaks a rule is rejected here and never reaches the API client.

use blogdesk_api_types::{
    CreateCategoryRequest, CreatePostRequest, CreateTagRequest, UpdateCategoryRequest,
    UpdatePostRequest, UpdateTagRequest,
};

use super::error::{DomainError, FieldViolation};

pub const CATEGORY_NAME_LEN: (usize, usize) = (2, 50);
pub const CATEGORY_DESCRIPTION_LEN: (usize, usize) = (10, 200);
pub const TAG_NAME_LEN: (usize, usize) = (2, 30);
pub const POST_TITLE_LEN: (usize, usize) = (5, 100);
pub const POST_CONTENT_MIN_LEN: usize = 50;
pub const POST_EXCERPT_LEN: (usize, usize) = (10, 200);
pub const POST_TAGS_COUNT: (usize, usize) = (1, 5);

/// A payload that passed validation. Only this module can construct one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T>(T);

impl<T> Validated<T> {
    pub fn get(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

#[derive(Default)]
struct Checker {
    violations: Vec<FieldViolation>,
}

impl Checker {
    fn text(&mut self, field: &'static str, label: &str, value: &str, min: usize, max: Option<usize>) {
        let len = value.chars().count();
        if len == 0 {
            self.violations
                .push(FieldViolation::new(field, format!("{label} is required")));
        } else if len < min {
            self.violations.push(FieldViolation::new(
                field,
                format!("{label} must be at least {min} characters"),
            ));
        } else if let Some(max) = max.filter(|max| len > *max) {
            self.violations.push(FieldViolation::new(
                field,
                format!("{label} must be less than {max} characters"),
            ));
        }
    }

    fn category_ref(&mut self, category_id: i64) {
        if category_id < 1 {
            self.violations
                .push(FieldViolation::new("categoryId", "Category is required"));
        }
    }

    fn tag_refs(&mut self, tags: &[i64]) {
        let (min, max) = POST_TAGS_COUNT;
        if tags.len() < min {
            self.violations
                .push(FieldViolation::new("tags", "At least one tag is required"));
        } else if tags.len() > max {
            self.violations.push(FieldViolation::new(
                "tags",
                format!("Maximum {max} tags allowed"),
            ));
        }
    }

    fn finish<T>(self, value: T) -> Result<Validated<T>, DomainError> {
        if self.violations.is_empty() {
            Ok(Validated(value))
        } else {
            Err(DomainError::validation(self.violations))
        }
    }
}

pub fn validate_create_category(
    req: CreateCategoryRequest,
) -> Result<Validated<CreateCategoryRequest>, DomainError> {
    let mut check = Checker::default();
    check_category_fields(&mut check, &req.name, &req.description);
    check.finish(req)
}

pub fn validate_update_category(
    req: UpdateCategoryRequest,
) -> Result<Validated<UpdateCategoryRequest>, DomainError> {
    let mut check = Checker::default();
    check_category_fields(&mut check, &req.name, &req.description);
    check.finish(req)
}

fn check_category_fields(check: &mut Checker, name: &str, description: &str) {
    let (name_min, name_max) = CATEGORY_NAME_LEN;
    let (desc_min, desc_max) = CATEGORY_DESCRIPTION_LEN;
    check.text("name", "Category name", name, name_min, Some(name_max));
    check.text("description", "Description", description, desc_min, Some(desc_max));
}

pub fn validate_create_tag(req: CreateTagRequest) -> Result<Validated<CreateTagRequest>, DomainError> {
    let mut check = Checker::default();
    let (min, max) = TAG_NAME_LEN;
    check.text("name", "Tag name", &req.name, min, Some(max));
    check.finish(req)
}

pub fn validate_update_tag(req: UpdateTagRequest) -> Result<Validated<UpdateTagRequest>, DomainError> {
    let mut check = Checker::default();
    let (min, max) = TAG_NAME_LEN;
    check.text("name", "Tag name", &req.name, min, Some(max));
    check.finish(req)
}

pub fn validate_create_post(
    req: CreatePostRequest,
) -> Result<Validated<CreatePostRequest>, DomainError> {
    let mut check = Checker::default();
    check_title(&mut check, &req.title);
    check_content(&mut check, &req.content);
    check_excerpt(&mut check, &req.excerpt);
    check.category_ref(req.category_id);
    check.tag_refs(&req.tags);
    check.finish(req)
}

/// Partial update: only fields that are present are checked.
pub fn validate_update_post(
    req: UpdatePostRequest,
) -> Result<Validated<UpdatePostRequest>, DomainError> {
    let mut check = Checker::default();
    if let Some(title) = req.title.as_deref() {
        check_title(&mut check, title);
    }
    if let Some(content) = req.content.as_deref() {
        check_content(&mut check, content);
    }
    if let Some(excerpt) = req.excerpt.as_deref() {
        check_excerpt(&mut check, excerpt);
    }
    if let Some(category_id) = req.category_id {
        check.category_ref(category_id);
    }
    if let Some(tags) = req.tags.as_deref() {
        check.tag_refs(tags);
    }
    check.finish(req)
}

fn check_title(check: &mut Checker, title: &str) {
    let (min, max) = POST_TITLE_LEN;
    check.text("title", "Title", title, min, Some(max));
}

fn check_content(check: &mut Checker, content: &str) {
    check.text("content", "Content", content, POST_CONTENT_MIN_LEN, None);
}

fn check_excerpt(check: &mut Checker, excerpt: &str) {
    let (min, max) = POST_EXCERPT_LEN;
    check.text("excerpt", "Excerpt", excerpt, min, Some(max));
}
