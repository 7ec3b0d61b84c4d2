pub mod args;
pub mod error;
pub mod model;
pub mod repository;
pub mod router;
pub mod storage;
pub mod controller {
    pub mod pages;
    pub mod players;
    pub mod response;
    pub mod rounds;
    pub mod score;
    pub mod story;
}
pub mod view {
    pub mod index;
    pub mod layout;
    pub mod pages;
    pub mod players;
    pub mod rounds;
    pub mod scores;
}

pub use repository::GolfRepository;
