use graphdash_rs::api::search::{
    HIDE_DELAY_MS, MIN_QUERY_LEN, SearchGraph, SearchInstance, SearchSuggest, SuggestAction,
    render_suggestions,
};

fn cpu_results() -> Vec<SearchGraph> {
    vec![SearchGraph {
        title: "CPU usage".to_owned(),
        instances: vec![
            SearchInstance {
                description: "alpha".to_owned(),
                params: "host=alpha;plugin=cpu".to_owned(),
            },
            SearchInstance {
                description: "beta".to_owned(),
                params: "host=beta;plugin=cpu".to_owned(),
            },
        ],
    }]
}

#[test]
fn short_queries_hide_the_panel_without_fetching() {
    let mut suggest = SearchSuggest::new();
    assert_eq!(suggest.input("c"), SuggestAction::HidePanel);
    assert!(!suggest.panel_visible());
    assert_eq!(suggest.input(""), SuggestAction::HidePanel);
}

#[test]
fn long_enough_queries_fetch_and_show_the_panel() {
    let mut suggest = SearchSuggest::new();
    assert_eq!(suggest.input("cp"), SuggestAction::Fetch("cp".to_owned()));
    assert!(suggest.panel_visible());
}

#[test]
fn query_length_counts_characters_not_bytes() {
    let mut suggest = SearchSuggest::new();
    assert_eq!(suggest.input("é"), SuggestAction::HidePanel);
    assert_eq!(suggest.input("éé"), SuggestAction::Fetch("éé".to_owned()));
    assert_eq!("éé".chars().count(), MIN_QUERY_LEN);
}

#[test]
fn results_apply_only_for_the_current_query() {
    let mut suggest = SearchSuggest::new();
    let _ = suggest.input("cp");
    let _ = suggest.input("cpu");

    assert!(!suggest.apply_results("cp", cpu_results()));
    assert!(suggest.results().is_empty());

    assert!(suggest.apply_results("cpu", cpu_results()));
    assert_eq!(suggest.results().len(), 1);
}

#[test]
fn shortening_the_query_keeps_old_results_for_refocus() {
    let mut suggest = SearchSuggest::new();
    let _ = suggest.input("cpu");
    assert!(suggest.apply_results("cpu", cpu_results()));

    let _ = suggest.input("c");
    assert!(!suggest.panel_visible());
    assert_eq!(suggest.results().len(), 1);
}

#[test]
fn blur_hides_the_panel_after_the_grace_period() {
    let mut suggest = SearchSuggest::new();
    let _ = suggest.input("cpu");
    assert!(suggest.panel_visible());

    suggest.focus_lost(10_000);
    assert!(!suggest.tick(10_000 + HIDE_DELAY_MS - 1));
    assert!(suggest.panel_visible());

    assert!(suggest.tick(10_000 + HIDE_DELAY_MS));
    assert!(!suggest.panel_visible());

    // The deadline is consumed; later ticks stay quiet.
    assert!(!suggest.tick(10_000 + 2 * HIDE_DELAY_MS));
}

#[test]
fn refocus_cancels_a_pending_hide() {
    let mut suggest = SearchSuggest::new();
    let _ = suggest.input("cpu");
    suggest.focus_lost(10_000);
    suggest.focus_gained();

    assert!(!suggest.tick(10_000 + 10 * HIDE_DELAY_MS));
    assert!(suggest.panel_visible());
}

#[test]
fn refocus_with_a_short_query_stays_hidden() {
    let mut suggest = SearchSuggest::new();
    let _ = suggest.input("c");
    suggest.focus_gained();
    assert!(!suggest.panel_visible());
}

#[test]
fn typing_cancels_a_pending_hide() {
    let mut suggest = SearchSuggest::new();
    let _ = suggest.input("cpu");
    suggest.focus_lost(10_000);

    assert_eq!(suggest.input("cpu "), SuggestAction::Fetch("cpu ".to_owned()));
    assert!(!suggest.tick(10_000 + 10 * HIDE_DELAY_MS));
    assert!(suggest.panel_visible());
}

#[test]
fn suggestions_render_as_graph_list_items() {
    let html = render_suggestions("collection.fcgi", &cpu_results());
    assert_eq!(
        html,
        "<li class=\"graph\">CPU usage<ul class=\"instance_list\">\
         <li class=\"instance\"><a href=\"collection.fcgi?action=show_instance;host=alpha;plugin=cpu\">alpha</a></li>\
         <li class=\"instance\"><a href=\"collection.fcgi?action=show_instance;host=beta;plugin=cpu\">beta</a></li>\
         </ul></li>"
    );
}

#[test]
fn graphs_without_instances_render_without_a_sublist() {
    let graphs = vec![SearchGraph {
        title: "Load".to_owned(),
        instances: Vec::new(),
    }];
    assert_eq!(
        render_suggestions("collection.fcgi", &graphs),
        "<li class=\"graph\">Load</li>"
    );
}

#[test]
fn rendered_text_is_html_escaped() {
    let graphs = vec![SearchGraph {
        title: "<b>CPU</b> & friends".to_owned(),
        instances: vec![SearchInstance {
            description: "a\"b".to_owned(),
            params: "host=a".to_owned(),
        }],
    }];
    let html = render_suggestions("collection.fcgi", &graphs);
    assert!(html.contains("&lt;b&gt;CPU&lt;/b&gt; &amp; friends"));
    assert!(html.contains(">a&quot;b</a>"));
    assert!(!html.contains("<b>"));
}
