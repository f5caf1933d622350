//! Built-in demo trees rendered by `twig render` and `twig click`.

use anyhow::{anyhow, Result};
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use twig_host::{HostTree, MemoryDocument};
use twig_renderer::{
    children, create_element, Attributes, Component, ComponentHandle, Descriptor, Node, RenderResult, Value,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    /// A card component with nested list children, class lists and style lists
    Showcase,
    /// A stateful counter driven by click events
    Counter,
}

impl Demo {
    pub const ALL: [Demo; 2] = [Demo::Showcase, Demo::Counter];

    pub fn name(&self) -> &'static str {
        match self {
            Demo::Showcase => "showcase",
            Demo::Counter => "counter",
        }
    }

    /// Id of the element `twig click` targets by default
    pub fn click_target(&self) -> &'static str {
        match self {
            Demo::Showcase => "a",
            Demo::Counter => "increment",
        }
    }

    pub fn build(&self, doc: &MemoryDocument) -> RenderResult<Node<MemoryDocument>> {
        match self {
            Demo::Showcase => showcase(doc),
            Demo::Counter => counter(doc),
        }
    }
}

impl FromStr for Demo {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> Result<Self> {
        Demo::ALL
            .into_iter()
            .find(|demo| demo.name() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = Demo::ALL.iter().map(Demo::name).collect();
                anyhow!("Unknown demo '{}'. Available: {}", name, known.join(", "))
            })
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Default)]
struct Card;

impl<H: HostTree> Component<H> for Card {
    fn render(&self, component: &ComponentHandle<H>) -> RenderResult<Node<H>> {
        let host = component.host();
        create_element(
            host,
            "div",
            Attributes::new()
                .with("id", "k")
                .with("class", json!(["h h1", "j"]))
                .with("style", json!({ "fontSize": "16px" })),
            children![
                create_element(host, "h1", Attributes::new(), children!["My Component"])?,
                component.children()
            ],
        )
    }
}

fn showcase(doc: &MemoryDocument) -> RenderResult<Node<MemoryDocument>> {
    let item = |label: &str| create_element(doc, "div", Attributes::new(), children![label]);
    let list = create_element(
        doc,
        "div",
        Attributes::new(),
        children![vec![
            children![item("1")?],
            children![item("2")?],
            children![vec![children![item("3")?], children![vec![item("3.1")?]]]],
        ]],
    )?;

    create_element(
        doc,
        Descriptor::component::<Card>(),
        Attributes::new()
            .with("id", "a")
            .with("class", json!(["b", "b1", ["c", "c1 c2", { "c3": true }]]))
            .with(
                "style",
                json!(["border: 1px solid #fff; backgroundColor: blue", { "color": "red" }]),
            ),
        children![list],
    )
}

#[derive(Default)]
struct Counter;

impl Counter {
    fn count<H: HostTree>(component: &ComponentHandle<H>) -> f64 {
        component
            .state()
            .and_then(|state| state.get("count").and_then(Value::as_f64))
            .unwrap_or(0.0)
    }
}

impl<H: HostTree> Component<H> for Counter {
    fn render(&self, component: &ComponentHandle<H>) -> RenderResult<Node<H>> {
        let host = component.host();
        let count = Self::count(component);
        let increment = component.handler(|component, _| {
            let next = Counter::count(component) + 1.0;
            component.set_state(Value::map([("count", next)]))
        });

        create_element(
            host,
            "div",
            Attributes::new().with("class", json!({ "counter": true, "counter-active": count > 0.0 })),
            children![
                create_element(
                    host,
                    "button",
                    Attributes::new().with("id", "increment").with("onClick", increment),
                    children!["+"],
                )?,
                create_element(
                    host,
                    "span",
                    Attributes::new().with("id", "count"),
                    children![format!("Count: {}", count)],
                )?
            ],
        )
    }
}

fn counter(doc: &MemoryDocument) -> RenderResult<Node<MemoryDocument>> {
    create_element(
        doc,
        Descriptor::component::<Counter>(),
        Attributes::new().with("id", "counter"),
        children![],
    )
}
