pub use super::manga_list::Entity as MangaList;
