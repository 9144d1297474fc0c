use bem_model::*;

fn sample_scene() -> Scene {
    Scene {
        surfaces: vec![
            SurfaceDef {
                id: Some("s1".into()),
                name: Some("south_roof".to_string()),
                normal: [0.0, -0.3, 0.95],
                vertex_count: 4,
                surface_type: None,
            },
            SurfaceDef {
                id: Some("ctx".into()),
                name: None,
                normal: [0.0, 1.0, 0.0],
                vertex_count: 8,
                surface_type: Some(SurfaceType::Shading),
            },
        ],
        inverters: vec![Inverter {
            handle: "inv-1".to_string(),
            name: "Main inverter".to_string(),
            cost: 800.0,
            efficiency: 0.95,
            replacement_years: Some(10),
        }],
        constructions: vec!["Construction,\n  Exterior Wall,\n  Brick;".to_string()],
        materials: vec!["void plastic grey_paint 0 0 5 0.5 0.5 0.5 0 0".to_string()],
    }
}

#[test]
fn roundtrip_yaml_scene() {
    let scene = sample_scene();
    let path = std::env::temp_dir().join("bem_model_roundtrip_scene.yaml");

    save_yaml(&path, &scene).unwrap();
    let loaded: Scene = load_yaml(&path).unwrap();

    assert_eq!(scene, loaded);
}

#[test]
fn roundtrip_json_scene() {
    let scene = sample_scene();
    let path = std::env::temp_dir().join("bem_model_roundtrip_scene.json");

    save_json(&path, &scene).unwrap();
    let loaded: Scene = load_any(&path).unwrap();

    assert_eq!(scene, loaded);
}

#[test]
fn surface_def_materialises_with_fallbacks() {
    let mut defs = sample_scene().surfaces.into_iter();

    let roof = defs
        .next()
        .unwrap()
        .into_surface("unused".into(), "unused".to_string());
    assert_eq!(roof.id.as_str(), "s1");
    assert_eq!(roof.surface_type, SurfaceType::Roof);
    assert!(!roof.type_is_user_input);

    let ctx = defs
        .next()
        .unwrap()
        .into_surface("gen".into(), "generated".to_string());
    assert_eq!(ctx.name, "generated");
    assert_eq!(ctx.surface_type, SurfaceType::Shading);
    assert_eq!(ctx.sub_face_count(), 2);
}

#[test]
fn minimal_surface_request_yaml() {
    let yaml = r#"
surfaces: [s1, ~]
surface_type: AirWall
"#;
    let request: SurfaceRequest = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(request.surfaces, vec![Some("s1".into()), None]);
    assert_eq!(
        request.surface_type.first().and_then(TypeCode::resolve),
        Some(SurfaceType::AirWall)
    );
    assert!(request.construction.is_empty());
}

#[test]
fn generators_keep_their_inverter_handle_through_yaml() {
    let inverter = std::sync::Arc::new(sample_scene().inverters.remove(0));
    let generator = |name: &str| PvGenerator {
        name: name.to_string(),
        surface_name: "south_roof".to_string(),
        performance_name: format!("DefaultSimplePVperformance0 {name}"),
        integration_mode: IntegrationMode::Decoupled,
        modules_in_parallel: 1,
        modules_in_series: 1,
        cost: 0.0,
        rated_power: bem_core::watts(250.0),
        coverage_fraction: 0.5,
        cell_efficiency: 0.12,
        inverter: std::sync::Arc::clone(&inverter),
    };
    let saved = vec![generator("a"), generator("b")];

    let yaml = serde_yaml::to_string(&saved).unwrap();
    let loaded: Vec<PvGenerator> = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(loaded, saved);
    assert_eq!(loaded[0].inverter.handle, "inv-1");
    assert!(!std::sync::Arc::ptr_eq(&loaded[0].inverter, &loaded[1].inverter));
}
