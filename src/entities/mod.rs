pub mod prelude;

pub mod manga_list;
