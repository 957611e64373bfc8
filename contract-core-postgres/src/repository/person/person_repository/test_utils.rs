#[cfg(test)]
pub mod test_utils {
    use contract_core_db::models::person::PersonModel;
    use heapless::String as HeaplessString;

    pub fn create_test_person(display_name: &str) -> PersonModel {
        PersonModel::new(HeaplessString::try_from(display_name).unwrap())
    }
}
