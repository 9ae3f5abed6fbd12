/**
 * Serializer Tests
 *
 * get_string on built and parsed trees, and the parse round trip
 */

#[path = "util/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::{add_ball_sentence, name, wrapped_ball_sentence, Acc};
    use message_accumulator::serialize;
    use serde_json::json;

    #[test]
    fn should_serialize_text() {
        let mut ma = Acc::new();
        assert_eq!(ma.get_string(), "");

        ma.add_text("Text");
        assert_eq!(ma.get_string(), "Text");
    }

    #[test]
    fn should_serialize_components() {
        let mut ma = Acc::new();
        ma.add_text("This is a ");
        ma.push(name("b"));
        ma.add_text("test");
        ma.pop();
        ma.add_text(" of the decomposition system.");
        assert_eq!(ma.get_string(), "This is a <c0>test</c0> of the decomposition system.");

        let mut ma = Acc::new();
        add_ball_sentence(&mut ma);
        assert_eq!(
            ma.get_string(),
            "You give <c0>the ball</c0> a big <c1>kick</c1> towards the goal."
        );
    }

    #[test]
    fn should_serialize_unbalanced_components_as_closed() {
        let mut ma = Acc::new();
        ma.add_text("This is a ");
        ma.push(name("b"));
        ma.add_text("test of the decomposition system.");
        assert_eq!(ma.get_string(), "This is a <c0>test of the decomposition system.</c0>");

        let mut ma = Acc::new();
        ma.push(name("a"));
        ma.add_text("You give ");
        ma.push(name("b"));
        ma.add_text("the ball");
        assert_eq!(ma.get_string(), "<c0>You give <c1>the ball</c1></c0>");
    }

    #[test]
    fn should_serialize_nested_and_outer_components() {
        let mut ma = Acc::new();
        ma.add_text("This is a ");
        ma.push(name("b"));
        ma.add_text("test of the ");
        ma.push(name("i"));
        ma.add_text("decomposition");
        ma.pop();
        ma.pop();
        ma.add_text(" system.");
        assert_eq!(
            ma.get_string(),
            "This is a <c0>test of the <c1>decomposition</c1></c0> system."
        );

        let ma = wrapped_ball_sentence(&["a"]);
        assert_eq!(
            ma.get_string(),
            "<c0>You give <c1>the ball</c1> a big <c2>kick</c2> towards the goal.</c0>"
        );
    }

    #[test]
    fn should_serialize_childless_components_as_self_closing() {
        let mut ma = Acc::new();
        ma.add_text("This is a test of the ");
        ma.push(json!({ "text": "<img src=\"http://www.example.com/foo.jpg\">" }));
        ma.pop();
        ma.add_text(" decomposition system.");
        assert_eq!(ma.get_string(), "This is a test of the <c0/> decomposition system.");
    }

    #[test]
    fn should_serialize_params() {
        let mut ma = Acc::new();
        ma.add_text("This is a ");
        ma.add_param(json!("{test}"));
        ma.add_text(" of the ");
        ma.push(name("b"));
        ma.add_param(json!("{system}"));
        ma.pop();
        ma.add_param(json!("%1"));
        assert_eq!(ma.get_string(), "This is a <p0/> of the <c0><p1/></c0><p2/>");
    }

    #[test]
    fn should_serialize_a_subtree() {
        let mut ma = Acc::new();
        ma.add_text("outer ");
        let bold = ma.push(name("b"));
        ma.add_text("inner ");
        ma.push(name("i"));
        ma.pop();
        ma.pop();

        assert_eq!(ma.serialize_node(bold), "<c0>inner <c1/></c0>");
        assert_eq!(serialize(ma.arena(), ma.root()), ma.get_string());
    }

    #[test]
    fn should_round_trip_parsed_strings() {
        let cases = vec![
            "",
            "This is a <c0>test</c0> of the decomposition system.",
            "<c0><c1>  \t </c1><c2>\n<c3>\n<c4/><p0/></c3>\n  text <c5>x</c5>   <c6>\n</c6></c2></c0>",
            "Einen großen <c1>Tritt</c1> in Richtung Tors <c2/> geben <c3>Sie</c3> am <c0>Ball</c0> hin.",
            "<p3/><p1/> and <c7><p0/></c7>",
            "literal <b> and <c0>unterminated",
        ];
        for input in cases {
            let ma = Acc::create(input);
            assert_eq!(ma.get_string(), input, "Failed for input: {}", input);
        }
    }

    #[test]
    fn should_round_trip_built_trees() {
        let mut built = Acc::new();
        built.push(name("a"));
        built.add_text("  You give ");
        built.add_param(json!("{who}"));
        add_ball_sentence(&mut built);
        built.push(name("empty"));
        built.pop();
        built.pop();
        built.add_text(" \n");

        let serialized = built.get_string();
        let reparsed = Acc::create_with_source(&serialized, &built);
        assert_eq!(reparsed.get_string(), serialized);
        assert_eq!(reparsed.get_mapping(), built.get_mapping());
    }
}
