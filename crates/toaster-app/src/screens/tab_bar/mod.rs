//! The tab bar container
//!
//! Hosts one navigation stack per content tab. The middle "plus" tab has no
//! stack of its own: selecting it starts link capture and leaves the current
//! selection alone.

use serde::{Deserialize, Serialize};

use crate::nav::StackId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Home,
    Clip,
    Plus,
    Search,
    Timer,
}

impl Tab {
    /// Tabs that own a navigation stack, in display order
    pub const CONTENT: [Tab; 4] = [Tab::Home, Tab::Clip, Tab::Search, Tab::Timer];
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TabBarAction {
    Select { tab: Tab },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TabBarIntent {
    TabSelected(Tab),
    PlusSelected,
}

#[derive(Debug)]
pub struct TabBarView {
    pub selected: Tab,
    tabs: Vec<(Tab, StackId)>,
}

impl TabBarView {
    pub fn new(tabs: Vec<(Tab, StackId)>) -> Self {
        Self {
            selected: Tab::Home,
            tabs,
        }
    }

    pub fn stack_for(&self, tab: Tab) -> Option<StackId> {
        self.tabs
            .iter()
            .find(|(t, _)| *t == tab)
            .map(|(_, stack)| *stack)
    }

    pub fn stacks(&self) -> Vec<StackId> {
        self.tabs.iter().map(|(_, stack)| *stack).collect()
    }

    /// The stack of the selected tab
    pub fn current_stack(&self) -> Option<StackId> {
        self.stack_for(self.selected)
    }

    pub(crate) fn act(&mut self, action: TabBarAction) -> Option<TabBarIntent> {
        match action {
            TabBarAction::Select { tab: Tab::Plus } => Some(TabBarIntent::PlusSelected),
            TabBarAction::Select { tab } if tab == self.selected => None,
            TabBarAction::Select { tab } => {
                if self.stack_for(tab).is_none() {
                    return None;
                }
                self.selected = tab;
                Some(TabBarIntent::TabSelected(tab))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> TabBarView {
        TabBarView::new(Tab::CONTENT.iter().zip(1..).map(|(t, s)| (*t, s)).collect())
    }

    #[test]
    fn test_home_is_selected_initially() {
        let view = view();
        assert_eq!(view.selected, Tab::Home);
        assert_eq!(view.current_stack(), Some(1));
    }

    #[test]
    fn test_reselecting_current_tab_is_silent() {
        let mut view = view();
        assert_eq!(view.act(TabBarAction::Select { tab: Tab::Home }), None);
        assert_eq!(
            view.act(TabBarAction::Select { tab: Tab::Search }),
            Some(TabBarIntent::TabSelected(Tab::Search))
        );
        assert_eq!(view.act(TabBarAction::Select { tab: Tab::Search }), None);
    }

    #[test]
    fn test_plus_keeps_selection() {
        let mut view = view();
        view.act(TabBarAction::Select { tab: Tab::Clip });

        assert_eq!(
            view.act(TabBarAction::Select { tab: Tab::Plus }),
            Some(TabBarIntent::PlusSelected)
        );
        assert_eq!(view.selected, Tab::Clip);
    }
}
