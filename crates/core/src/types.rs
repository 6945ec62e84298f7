/// Entity identifiers are UUIDs assigned by the store on create.
pub type DbId = uuid::Uuid;
