//! End-to-end model of a realistic declaration file.

use dts_model::{from_source, Kind, Object};
use pretty_assertions::assert_eq;

const SAMPLE: &str = include_str!("fixtures/sample.d.ts");

fn sample() -> Object {
    from_source("sample.d.ts", SAMPLE).unwrap()
}

fn names(map: &std::collections::BTreeMap<String, Object>) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

#[test]
fn top_level_blocks() {
    let file = sample();
    assert_eq!(file.kind, Kind::TopLevel);
    assert_eq!(file.name(), "sample.d.ts");
    assert_eq!(names(&file.interfaces), vec!["JQuery", "SimplePaginationOptions"]);
    assert_eq!(names(&file.classes), vec!["PIXI"]);
    assert_eq!(names(&file.modules), vec!["NodeJS"]);
    assert!(file.vars.is_empty());
    assert!(file.funcs.is_empty());
}

#[test]
fn optional_properties() {
    let file = sample();
    let options = &file.interfaces["SimplePaginationOptions"];
    assert_eq!(options.kind, Kind::Interface);
    assert_eq!(options.vars.len(), 7);
    assert!(options.vars.values().all(|v| v.is_optional));
    assert_eq!(options.vars["hrefTextPrefix"].types, vec!["string"]);
    assert_eq!(
        options.vars["onPageClick"].types,
        vec!["(page: number, event: any) => void"]
    );
    assert_eq!(options.vars["onInit"].types, vec!["() => void"]);
}

#[test]
fn overloads_and_constructor() {
    let file = sample();
    let jquery = &file.interfaces["JQuery"];
    assert_eq!(jquery.funcs.len(), 5);
    assert_eq!(jquery.overloads("pagination").count(), 4);

    let ctor = jquery.constructor.as_ref().unwrap();
    assert_eq!(ctor.args.len(), 1);
    assert_eq!(ctor.args[0].ident.name, "options");
    assert!(ctor.args[0].is_optional);
    assert_eq!(ctor.args[0].types, vec!["{}"]);
    assert!(ctor.return_type.is_empty());

    let select = &jquery.funcs[2];
    assert_eq!(select.args[0].types, vec!["'selectPage'"]);
    assert_eq!(select.args[1].ident.name, "pageNumber");
    assert_eq!(select.return_type, vec!["void"]);
}

#[test]
fn static_members() {
    let file = sample();
    let pixi = &file.classes["PIXI"];
    assert_eq!(pixi.ident.modifiers, vec!["declare"]);

    let detect = &pixi.funcs[0];
    assert_eq!(detect.ident.name, "autoDetectRenderer");
    assert_eq!(detect.ident.modifiers, vec!["static"]);
    let args: Vec<(&str, bool)> = detect
        .args
        .iter()
        .map(|a| (a.ident.name.as_str(), a.is_optional))
        .collect();
    assert_eq!(
        args,
        vec![("width", false), ("height", false), ("options", true), ("noWebGL", true)]
    );
    assert_eq!(detect.args[2].types, vec!["PIXI.RendererOptions"]);
    assert_eq!(
        detect.return_type,
        vec!["PIXI.WebGLRenderer", "PIXI.CanvasRenderer"]
    );

    assert_eq!(pixi.vars["TARGET_FPMS"].types, vec!["number"]);
    let render_type = &pixi.vars["RENDER_TYPE"].types[0];
    assert!(render_type.starts_with('{') && render_type.ends_with('}'));
    assert!(render_type.contains("WEBGL: number;"));
}

#[test]
fn nested_modules() {
    let file = sample();
    let node = &file.modules["NodeJS"];
    assert_eq!(node.ident.modifiers, vec!["declare"]);
    assert_eq!(names(&node.interfaces), vec!["ErrnoException", "EventEmitter"]);

    let errno = &node.interfaces["ErrnoException"];
    assert_eq!(errno.ident.modifiers, vec!["export"]);
    assert_eq!(errno.extends, vec!["Error"]);
    assert_eq!(errno.vars.len(), 3);

    let emitter = &node.interfaces["EventEmitter"];
    let emit = emitter.overloads("emit").next().unwrap();
    assert_eq!(emit.args[1].ident.name, "...args");
    assert_eq!(emit.args[1].types, vec!["any[]"]);
    assert_eq!(emit.return_type, vec!["boolean"]);
    assert_eq!(
        emitter.overloads("listeners").next().unwrap().return_type,
        vec!["Function[]"]
    );

    let vm = &node.modules["vm"];
    assert!(vm.interfaces["Context"].vars.is_empty());
    assert_eq!(vm.funcs.len(), 2);
    assert!(vm
        .funcs
        .iter()
        .all(|f| f.ident.modifiers == vec!["export", "function"]));
    assert_eq!(vm.funcs[1].return_type, vec!["Context"]);
}
