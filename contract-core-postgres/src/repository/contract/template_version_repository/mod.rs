pub mod repo_impl;
pub mod load;
pub mod create_batch;
pub mod find_by_template_id;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::TemplateVersionRepositoryImpl;
