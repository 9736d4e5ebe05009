// All repository functions are generic over `E: Executor<'e, Database = Postgres>`
// so they accept both a `&PgPool` (direct query) and a `&mut Transaction` (atomic operations).
//
// Every topic and goal query binds the owner id; a row owned by someone else
// is indistinguishable from a missing row.

pub mod goal;
pub mod topic;
pub mod user;
