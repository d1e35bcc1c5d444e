use sea_query::Iden;

#[derive(Iden, Clone, Copy)]
pub enum Event {
    Table,
    Id,
    Title,
    Day,
    Time,
    Description,
    CreatedAt,
    UpdatedAt,
}
