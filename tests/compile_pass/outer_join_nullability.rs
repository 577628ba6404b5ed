use sqlweave::prelude::*;

table! {
    pub struct Author("author") {
        id: Int [primary_key, default],
        name: Text,
    }
}

table! {
    pub struct Book("book") {
        id: Int [primary_key, default],
        author_id: Int,
        title: Text,
    }
}

fn main() {
    let (author, book) = (Author::default(), Book::default());
    let query = select((author.name, book.title))
        .from(author.left_join(book).on(book.author_id.eq(author.id)))
        .unconditionally()
        .build();

    let row: (String, Option<String>) = query
        .decode(&vec![Value::from("Le Guin"), Value::Null])
        .unwrap();
    assert_eq!(row.1, None);
}
