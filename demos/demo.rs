use scrollpool::{
    ItemSource, Position, PooledNode, Recipe, ReturnPolicy, ScrollView, ScrollViewOptions, Size,
};

const VERSES: &[&str] = &[
    "the ninth month, the third of autumn",
    "standing water gone, the cold pool clear",
    "mist condenses, the evening hills turn purple",
    "clouds part, the rain stops",
    "the sunset cloud flies with a lone duck",
];

/// Stand-in for a host widget.
#[derive(Debug)]
struct Label {
    kind: String,
    text: String,
    visible: bool,
    at: Position,
    size: Size,
}

impl PooledNode for Label {
    type Parent = ();

    fn set_active(&mut self, active: bool) {
        self.visible = active;
    }

    fn set_position(&mut self, position: Position) {
        self.at = position;
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}

struct Row {
    kind: String,
    content: String,
}

struct Rows(Vec<Row>);

impl Rows {
    fn make(index: usize) -> Row {
        Row {
            kind: format!("Item{}", index % 5 + 1),
            content: VERSES[index % VERSES.len()].to_string(),
        }
    }
}

impl ItemSource<Label, String> for Rows {
    fn identifier(&mut self, index: usize) -> Option<String> {
        self.0.get(index).map(|row| row.kind.clone())
    }

    fn refresh(&mut self, index: usize, _identifier: &String, node: &mut Label) {
        if let Some(row) = self.0.get(index) {
            node.text = format!("{} Index: {index}", row.content);
        }
    }
}

fn dump(view: &ScrollView<Rows, Label>) {
    println!(
        "offset={} content={} range={:?}",
        view.scroll_offset(),
        view.content_extent(),
        view.viewport_range()
    );
    view.for_each_active(|index, node| {
        println!(
            "  [{index}] {} y={} h={} visible={} {:?}",
            node.kind, node.at.y, node.size.height, node.visible, node.text
        );
    });
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ScrollViewOptions::new(|n: &Label| n.kind.clone())
        .with_spacing(4.0)
        .with_return_policy(ReturnPolicy::Hide)
        .with_viewport_extent(200.0);
    for kind in 1..=5 {
        let height = 40.0 + 10.0 * kind as f32;
        options = options.with_template(
            format!("Item{kind}"),
            Size::new(300.0, height),
            Recipe::new(|kind: &String| Label {
                kind: kind.clone(),
                text: String::new(),
                visible: false,
                at: Position::ORIGIN,
                size: Size::ZERO,
            }),
        );
    }

    let rows = Rows((0..5).map(Rows::make).collect());
    let mut view = ScrollView::new(options, rows)?;
    view.append(5);
    println!("initial");
    dump(&view);

    let start = view.item_count();
    view.source_mut().0.extend((start..start + 50).map(Rows::make));
    view.append(50);
    println!("append 50");
    dump(&view);

    view.source_mut()
        .0
        .splice(1..1, (0..3).map(|i| Rows::make(i + 100)));
    view.insert(1, 3)?;
    println!("insert 3 at 1");
    dump(&view);

    view.source_mut().0.remove(0);
    view.remove_at(0)?;
    println!("remove 0");
    dump(&view);

    if let Some(row) = view.source_mut().0.get_mut(1) {
        row.content = format!("[changed] {}", row.content);
    }
    view.refresh(1, None);
    println!("refresh 1");
    dump(&view);

    view.set_item_size(0, Size::new(300.0, 150.0))?;
    println!("resize 0");
    dump(&view);

    let offset = view.jump_to_index(40)?;
    println!("jump to 40 -> offset {offset}");
    dump(&view);

    view.on_scroll(offset - 120.0);
    println!("scroll back");
    dump(&view);

    view.source_mut().0.clear();
    view.clear();
    println!("clear");
    dump(&view);
    println!("{:?}", view.pool());

    Ok(())
}
