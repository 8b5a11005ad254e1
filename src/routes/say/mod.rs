mod handler;
mod model;

pub use handler::{create_say, list_says};
pub use model::{
    AckResponse, CreateSayForm, DEFAULT_LIMIT, DEFAULT_PAGE, ListSaysQuery, ListSaysResponse,
    MAX_LIMIT, NewSay, Pagination, add_say, list_recent_says,
};
