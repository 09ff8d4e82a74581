mod common;

use common::{start_fake_api, FakeApi};
use inventory_console::clients::PageClient;
use inventory_console::config::ConsoleConfig;
use inventory_console::lifecycle::ConsoleSystem;
use inventory_console::model::{Category, Product, Warehouse, WarehouseId};
use inventory_console::shell::{self, Reply};
use resource_sync::mock::{MockCollection, RemoteCall};
use resource_sync::Submitted;
use serde_json::json;

async fn run(system: &ConsoleSystem, line: &str) -> String {
    match shell::execute(system, line.parse().unwrap()).await.unwrap() {
        Reply::Print(text) => text,
        Reply::Quit => panic!("unexpected quit"),
    }
}

#[tokio::test]
async fn test_edit_usage_against_mock() {
    let cold_room = Warehouse::new(1, "Cámara", "FRIO", "0-4°C", 100.0, 40.0);
    let mut warehouses = MockCollection::<Warehouse>::new();
    warehouses.expect_list().return_ok(vec![cold_room.clone()]);
    warehouses.expect_update(WarehouseId(1)).return_ok(None);
    warehouses.expect_list().return_ok(vec![Warehouse {
        uso_actual: 55.0,
        ..cold_room.clone()
    }]);
    let mut categories = MockCollection::<Category>::new();
    categories.expect_list().return_ok(vec![]);
    let mut products = MockCollection::<Product>::new();
    products.expect_list().return_ok(vec![]);

    let system = ConsoleSystem::start(
        &ConsoleConfig::default(),
        warehouses.collection(),
        categories.collection(),
        products.collection(),
    );
    for (page, result) in system.load_all().await {
        assert!(result.is_ok(), "{page} failed to load");
    }

    let view = system.warehouses.snapshot().await.unwrap();
    system
        .warehouses
        .begin_edit(view.find(WarehouseId(1)).unwrap().clone())
        .await
        .unwrap();
    system
        .warehouses
        .set_field("uso_actual".into(), "55".into())
        .await
        .unwrap();
    let submitted = system.warehouses.submit().await.unwrap();
    assert_eq!(
        submitted,
        Submitted::Updated {
            id: WarehouseId(1),
            echoed: None
        }
    );

    let calls = warehouses.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(
        calls[1].body(),
        Some(json!({
            "id": 1,
            "nombre": "Cámara",
            "tipo": "FRIO",
            "rango_temperatura": "0-4°C",
            "capacidad": 100.0,
            "uso_actual": 55.0
        }))
    );
    assert_eq!(calls[2], RemoteCall::List);

    let view = system.warehouses.snapshot().await.unwrap();
    assert_eq!(view.mirror[0].uso_actual, 55.0);
    assert!(!view.editing);
    assert_eq!(view.draft, Warehouse::default());

    system.shutdown().await.unwrap();
    warehouses.verify();
    categories.verify();
    products.verify();
}

#[tokio::test]
async fn test_edit_usage_against_fake_api() {
    let api = FakeApi::default();
    api.seed(
        "almacenes",
        vec![
            json!({"id": 1, "nombre": "Cámara", "tipo": "FRIO", "rango_temperatura": "0-4°C", "capacidad": 100, "uso_actual": 40}),
            json!({"id": 2, "nombre": "Seco", "tipo": "SECO", "rango_temperatura": "15-25°C", "capacidad": 300, "uso_actual": 120}),
        ],
    );
    let config = ConsoleConfig {
        api_url: start_fake_api(api.clone()).await,
        ..ConsoleConfig::default()
    };
    let system = ConsoleSystem::new(&config).unwrap();
    system.load_all().await;

    let form = run(&system, "edit almacenes 1").await;
    assert!(form.starts_with("Editando almacenes #1"));
    run(&system, "set almacenes uso_actual 55").await;
    let out = run(&system, "submit almacenes").await;
    assert!(out.starts_with("Actualizado #1"));

    let hits = api.hits();
    let put = hits.iter().position(|hit| hit.method == "PUT").unwrap();
    assert_eq!(hits[put].path, "/almacenes/1");
    assert_eq!(hits[put].body.as_ref().unwrap()["uso_actual"], json!(55.0));
    assert_eq!(hits[put + 1].method, "GET");
    assert_eq!(hits[put + 1].path, "/almacenes");

    // Row 2 is untouched, row 1 shows the new usage.
    let table = run(&system, "list almacenes").await;
    let row = table.lines().find(|line| line.starts_with("1 ")).unwrap();
    assert!(row.trim_end().ends_with("55"));
    assert!(table.contains("Seco"));

    let form = run(&system, "show almacenes").await;
    assert!(form.starts_with("Nuevo registro en almacenes"));

    system.shutdown().await.unwrap();
}
