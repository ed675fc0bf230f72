use std::path::PathBuf;

use searchindex::{
    CrateIndexBuilder, Error, ItemKind, Query, SearchIndexBuilder, Signature, load_file, parse,
    render, resolve_all, search,
};

const CRATE: &str = "electron_phonon_scattering_2d";

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/search-index.js")
}

#[test]
fn fixture_loads_and_registers_one_crate() {
    let index = load_file(fixture_path()).unwrap();
    assert_eq!(index.crate_names().collect::<Vec<_>>(), [CRATE]);
    assert_eq!(index.item_count(), 66);
    assert_eq!(index.get(CRATE).map(|c| c.paths.len()), Some(9));
}

#[test]
fn owner_indexes_point_at_paths() {
    let index = load_file(fixture_path()).unwrap();
    let krate = index.get(CRATE).unwrap();

    let field = krate.items.iter().find(|i| i.name == "a").unwrap();
    let owner = krate.owner_of(field).unwrap();
    assert_eq!((owner.kind, owner.name.as_str()), (ItemKind::Struct, "BrillouinZone"));

    let momentums = krate.items.iter().find(|i| i.name == "momentums").unwrap();
    let owner = krate.owner_of(momentums).unwrap();
    assert_eq!((owner.kind, owner.name.as_str()), (ItemKind::Trait, "Material"));
}

#[test]
fn compressed_paths_expand() {
    let index = load_file(fixture_path()).unwrap();
    let items = resolve_all(&index);
    let zone = items
        .iter()
        .find(|i| i.kind == ItemKind::Struct && i.name == "BrillouinZone")
        .unwrap();
    assert_eq!(
        zone.qualified_name(),
        "electron_phonon_scattering_2d::material::BrillouinZone"
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_file("/nonexistent/search-index.js").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn built_index_survives_render_and_parse() {
    let mut krate = CrateIndexBuilder::new("geom");
    let shape = krate.path(ItemKind::Trait, "Shape");
    krate
        .item(ItemKind::Module, "shapes", "geom", Some("Plane shapes"), None, None)
        .item(ItemKind::Trait, "Shape", "geom::shapes", None, None, None)
        .item(
            ItemKind::TyMethod,
            "area",
            "geom::shapes",
            Some("Area in square units"),
            Some(shape),
            Some(Signature::new(["shape"], Some("f64"))),
        );
    let (name, krate) = krate.finish();

    let mut builder = SearchIndexBuilder::new();
    builder.register(name, krate).unwrap();
    let index = builder.build().unwrap();

    let text = render(&index).unwrap();
    insta::assert_snapshot!(text, @r#"
    var searchIndex = {};
    searchIndex['geom'] = {"items":[[0,"shapes","geom","Plane shapes",null,null],[8,"Shape","geom::shapes",null,null,null],[10,"area","","Area in square units",0,{"inputs":[{"name":"shape"}],"output":{"name":"f64"}}]],"paths":[[8,"Shape"]]};
    initSearch(searchIndex);
    "#);
    assert_eq!(parse(&text).unwrap(), index);

    let items = resolve_all(&index);
    let hits = search(&items, &Query::parse("shape -> f64").unwrap());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].qualified_name(), "geom::shapes::Shape::area");
}

#[test]
fn second_registration_is_rejected() {
    let mut builder = SearchIndexBuilder::new();
    builder
        .register("geom", CrateIndexBuilder::new("geom").finish().1)
        .unwrap();
    let err = builder
        .register("geom", CrateIndexBuilder::new("geom").finish().1)
        .unwrap_err();
    assert_eq!(err.to_string(), "Crate 'geom' is registered more than once");
}
