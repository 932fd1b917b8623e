//! What a list page has open and selected.

use std::rc::Rc;

use payloads::Resource;
use yew::Reducible;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListDialog<Id> {
    None,
    Filter,
    Create,
    Update(Id),
    ConfirmDelete(Id),
    ConfirmDeleteMany,
    Import,
}

#[derive(Clone, PartialEq)]
pub struct ListState<R: Resource> {
    pub filter: Option<R::Filter>,
    pub selected: Vec<R::Id>,
    pub dialog: ListDialog<R::Id>,
    /// Bumped every time a form dialog opens, so the form knows when to
    /// load its starting values.
    pub opening: u32,
}

impl<R: Resource> Default for ListState<R> {
    fn default() -> Self {
        Self {
            filter: None,
            selected: Vec::new(),
            dialog: ListDialog::None,
            opening: 0,
        }
    }
}

impl<R: Resource> ListState<R> {
    pub fn is_selected(&self, id: R::Id) -> bool {
        self.selected.contains(&id)
    }
}

pub enum ListAction<R: Resource> {
    OpenCreate,
    OpenUpdate(R::Id),
    OpenFilter,
    OpenImport,
    AskDelete(R::Id),
    AskDeleteMany,
    Close,
    SetFilter(Option<R::Filter>),
    ToggleRow(R::Id),
    /// Select every visible row, or clear the selection if they all are.
    ToggleAll(Vec<R::Id>),
    MutationSucceeded,
}

impl<R: Resource> Reducible for ListState<R> {
    type Action = ListAction<R>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ListAction::OpenCreate => {
                next.dialog = ListDialog::Create;
                next.opening += 1;
            }
            ListAction::OpenUpdate(id) => {
                next.dialog = ListDialog::Update(id);
                next.opening += 1;
            }
            ListAction::OpenFilter => next.dialog = ListDialog::Filter,
            ListAction::OpenImport => next.dialog = ListDialog::Import,
            ListAction::AskDelete(id) => {
                next.dialog = ListDialog::ConfirmDelete(id)
            }
            ListAction::AskDeleteMany => {
                if next.selected.is_empty() {
                    return self;
                }
                next.dialog = ListDialog::ConfirmDeleteMany;
            }
            ListAction::Close => next.dialog = ListDialog::None,
            ListAction::SetFilter(filter) => {
                next.filter = filter;
                next.selected.clear();
                next.dialog = ListDialog::None;
            }
            ListAction::ToggleRow(id) => {
                if let Some(at) = next.selected.iter().position(|s| *s == id) {
                    next.selected.remove(at);
                } else {
                    next.selected.push(id);
                }
            }
            ListAction::ToggleAll(visible) => {
                let all_selected = !visible.is_empty()
                    && visible.iter().all(|id| next.selected.contains(id));
                next.selected = if all_selected { Vec::new() } else { visible };
            }
            ListAction::MutationSucceeded => {
                next.dialog = ListDialog::None;
                next.selected.clear();
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::DepartmentId;
    use payloads::filters::NameFilter;
    use payloads::responses::Department;

    type State = Rc<ListState<Department>>;

    fn reduce(state: State, action: ListAction<Department>) -> State {
        state.reduce(action)
    }

    #[test]
    fn each_form_opening_is_counted() {
        let state = State::default();
        let state = reduce(state, ListAction::OpenCreate);
        assert_eq!(state.dialog, ListDialog::Create);
        assert_eq!(state.opening, 1);

        let state = reduce(state, ListAction::Close);
        let state = reduce(state, ListAction::OpenUpdate(DepartmentId(3)));
        assert_eq!(state.dialog, ListDialog::Update(DepartmentId(3)));
        assert_eq!(state.opening, 2);

        // confirmations don't reset forms
        let state = reduce(state, ListAction::AskDelete(DepartmentId(3)));
        assert_eq!(state.opening, 2);
    }

    #[test]
    fn bulk_delete_needs_a_selection() {
        let state = reduce(State::default(), ListAction::AskDeleteMany);
        assert_eq!(state.dialog, ListDialog::None);

        let state = reduce(state, ListAction::ToggleRow(DepartmentId(1)));
        let state = reduce(state, ListAction::AskDeleteMany);
        assert_eq!(state.dialog, ListDialog::ConfirmDeleteMany);
    }

    #[test]
    fn selection_toggles() {
        let ids = vec![DepartmentId(1), DepartmentId(2)];
        let state = reduce(State::default(), ListAction::ToggleRow(ids[0]));
        assert!(state.is_selected(ids[0]));

        let state = reduce(state, ListAction::ToggleAll(ids.clone()));
        assert_eq!(state.selected, ids);
        let state = reduce(state, ListAction::ToggleAll(ids.clone()));
        assert!(state.selected.is_empty());

        let state = reduce(state, ListAction::ToggleRow(ids[1]));
        let state = reduce(state, ListAction::ToggleRow(ids[1]));
        assert!(state.selected.is_empty());
    }

    #[test]
    fn success_closes_and_clears() {
        let state = reduce(State::default(), ListAction::ToggleRow(DepartmentId(4)));
        let state = reduce(state, ListAction::AskDeleteMany);
        let state = reduce(state, ListAction::MutationSucceeded);
        assert_eq!(state.dialog, ListDialog::None);
        assert!(state.selected.is_empty());
    }

    #[test]
    fn new_filter_drops_the_selection() {
        let state = reduce(State::default(), ListAction::ToggleRow(DepartmentId(4)));
        let state = reduce(state, ListAction::OpenFilter);
        let state = reduce(
            state,
            ListAction::SetFilter(Some(NameFilter("eng".into()))),
        );
        assert_eq!(state.filter, Some(NameFilter("eng".into())));
        assert!(state.selected.is_empty());
        assert_eq!(state.dialog, ListDialog::None);
    }
}
