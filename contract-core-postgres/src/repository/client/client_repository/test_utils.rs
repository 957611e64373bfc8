#[cfg(test)]
pub mod test_utils {
    use contract_core_api::domain::term::Jurisdiction;
    use contract_core_db::models::client::ClientModel;
    use heapless::String as HeaplessString;

    pub fn create_test_client(name: &str, jurisdiction: Jurisdiction) -> ClientModel {
        ClientModel::new(HeaplessString::try_from(name).unwrap(), jurisdiction)
    }
}
