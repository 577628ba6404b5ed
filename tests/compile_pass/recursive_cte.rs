use sqlweave::prelude::*;

table! {
    pub struct Category("category") {
        id: Int [primary_key, default],
        parent_id: Nullable<Int>,
        name: Text,
    }
}

name_tag!(struct Tree = "tree"; struct Child = "child";);

fn main() {
    let category = Category::default();
    let tree = cte(Tree).as_(
        select((category.id, category.name))
            .from(category)
            .where_(category.parent_id.is_null())
            .build(),
    );
    let t = tree.table();
    let child = category.as_(Child);
    let step = select((child.col(category.id), child.col(category.name)))
        .from(t.join(child).on(child.col(category.parent_id).eq(t.col(category.id))))
        .unconditionally()
        .build();
    let tree = tree.union_all(step);

    let query = select((tree.col(category.id), tree.col(category.name)))
        .from(tree.table())
        .unconditionally()
        .build();
    let query = with(tree).query(query);
    let rendered = query.render(Dialect::PostgreSQL).unwrap();
    assert!(rendered.sql.starts_with("WITH RECURSIVE"));
}
