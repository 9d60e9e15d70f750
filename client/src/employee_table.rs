use seed::{prelude::*, *};
use shared::selection::DELETE_ERROR_MESSAGE;
use shared::{ApiResult, Directory, Employee, EmployeeId, Selection};

use crate::Client;

const COLUMNS: [&str; 6] = ["Name", "Surname", "Age", "Salary", "Position", "Email"];

pub enum Msg {
    Toggle(EmployeeId),
    ToggleAll,
    Delete,
    Deleted(Vec<EmployeeId>, ApiResult<()>),
    DismissError,
}

pub fn update(msg: Msg, directory: &mut Directory, client: &Client, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::Toggle(id) => {
            directory.selection.toggle(id);
        }

        Msg::ToggleAll => {
            if let Some(employees) = directory.store.employees() {
                directory.selection.toggle_all(employees);
            }
        }

        Msg::Delete => match directory.begin_delete() {
            Some(ids) => {
                let client = client.clone();
                orders.perform_cmd(async move {
                    let result = shared::employees::delete_employees(&client, &ids).await;
                    Msg::Deleted(ids, result)
                });
            }
            None => {
                orders.skip();
            }
        },

        Msg::Deleted(ids, result) => {
            if let Err(err) = &result {
                error!("could not delete employees:", err.to_string());
            }
            directory.finish_delete(ids, result);
        }

        Msg::DismissError => {
            directory.selection.dismiss_error();
        }
    }
}

pub fn view(employees: &[Employee], selection: &Selection) -> Node<Msg> {
    div![
        C!["table"],
        table![
            C!["table table-hover"],
            thead![tr![
                th![input![
                    attrs! {
                        At::Type => "checkbox",
                        At::Checked => selection.all_selected(employees).as_at_value(),
                    },
                    ev(Ev::Change, |_| Msg::ToggleAll),
                ]],
                COLUMNS.iter().map(|column| th![*column]).collect::<Vec<_>>(),
            ]],
            tbody![employees
                .iter()
                .map(|employee| row(employee, selection.is_selected(employee.id)))
                .collect::<Vec<_>>()],
        ],
        IF!(selection.is_deleting() => crate::spinner()),
        IF!(selection.can_delete() => div![
            C!["table__delete-row"],
            button![
                C!["btn btn-outline-danger"],
                ev(Ev::Click, |_| Msg::Delete),
                "Delete selected rows"
            ],
        ]),
        IF!(selection.has_delete_error() => crate::alert(DELETE_ERROR_MESSAGE, || Msg::DismissError)),
    ]
}

fn row(employee: &Employee, selected: bool) -> Node<Msg> {
    let id = employee.id;
    tr![
        td![input![
            attrs! {
                At::Type => "checkbox",
                At::Checked => selected.as_at_value(),
            },
            ev(Ev::Change, move |_| Msg::Toggle(id)),
        ]],
        td![employee.name.as_str()],
        td![employee.surname.as_str()],
        td![employee.age.to_string()],
        td![employee.salary.to_string()],
        td![employee.position.as_str()],
        td![employee.email.as_str()],
    ]
}
