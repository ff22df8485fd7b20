use super::error::PersistError;

/// Write side of the question store.
///
/// Every call returns; failures are values, never panics, so callers can
/// skip a record and keep going.
pub trait QuestionGateway {
    /// Create the question table if absent. Safe to call repeatedly.
    fn ensure_schema(&self) -> Result<(), PersistError>;

    fn insert_question(
        &self,
        type_tag: &str,
        question_text: &str,
        options_text: &str,
        subject_name: Option<&str>,
        chapter_name: Option<&str>,
    ) -> Result<(), PersistError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_is_object_safe() {
        fn _assert_gateway(_: &dyn QuestionGateway) {}
    }
}
