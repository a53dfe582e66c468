//! Operation documents sent to the EcoDeli GraphQL endpoint.
//!
//! Each document selects only what its callers display, so the models in
//! `crate::models` treat fields outside the common subset as optional.

pub const LOGIN: &str = r#"
mutation Login($input: LoginInput!) {
    login(input: $input) {
        token
    }
}
"#;

pub const GET_ME: &str = r#"
query GetMe {
    me {
        id
        email
        firstName
        lastName
        phone
        avatar
        role
        createdAt
    }
}
"#;

pub const LIST_TASKS: &str = r#"
query GetTasks($filters: TaskFilters) {
    listTasks(filters: $filters) {
        id
        title
        description
        type
        status
        calculatedPriceInCents
        fileUrl
        createdAt
        updatedAt
        address {
            id
            mainText
            secondaryText
            fullAddress
        }
        user {
            id
            firstName
            lastName
        }
        category {
            id
            name
            color
        }
        shipping {
            packageCategory
            pickupAddress {
                mainText
                secondaryText
            }
            deliveryAddress {
                mainText
                secondaryText
            }
        }
    }
}
"#;

pub const GET_MY_TASKS: &str = r#"
query GetMyTasks {
    getMyTasks {
        id
        title
        description
        type
        status
        calculatedPriceInCents
        fileUrl
        createdAt
        updatedAt
        address {
            mainText
            secondaryText
        }
        category {
            id
            name
            color
        }
        shipping {
            packageCategory
            pickupAddress {
                mainText
                secondaryText
            }
            deliveryAddress {
                mainText
                secondaryText
            }
        }
        applications {
            id
            status
            applicant {
                firstName
                lastName
            }
        }
    }
}
"#;

pub const GET_MY_APPLICATIONS: &str = r#"
query GetMyApplications {
    getMyApplications {
        id
        status
        message
        validationCode
        startedAt
        completedAt
        validatedAt
        createdAt
        task {
            id
            title
            description
            type
            status
            calculatedPriceInCents
            address {
                mainText
                secondaryText
            }
            user {
                firstName
                lastName
            }
            category {
                name
                color
            }
            shipping {
                packageCategory
                pickupAddress {
                    mainText
                }
                deliveryAddress {
                    mainText
                }
            }
        }
    }
}
"#;

pub const GET_TASK: &str = r#"
query GetTask($id: ID!) {
    getTask(id: $id) {
        id
        title
        description
        type
        status
        calculatedPriceInCents
        fileUrl
        completedAt
        validatedAt
        createdAt
        updatedAt
        address {
            id
            mainText
            secondaryText
            fullAddress
            lat
            lng
        }
        user {
            id
            firstName
            lastName
            phone
        }
        category {
            id
            name
            description
            color
        }
        shipping {
            id
            packageCategory
            packageDetails
            estimatedDistanceInMeters
            estimatedDurationInMinutes
            calculatedPriceInCents
            pickupAddress {
                mainText
                secondaryText
                fullAddress
            }
            deliveryAddress {
                mainText
                secondaryText
                fullAddress
            }
        }
        applications {
            id
            status
            message
            validationCode
            startedAt
            completedAt
            validatedAt
            applicant {
                id
                firstName
                lastName
                phone
            }
        }
        messages {
            id
            content
            messageType
            isRead
            createdAt
            sender {
                id
                firstName
                lastName
            }
            receiver {
                id
                firstName
                lastName
            }
        }
    }
}
"#;

pub const VALIDATE_TASK_COMPLETION: &str = r#"
mutation ValidateTaskCompletion($taskId: ID!, $validationCode: String!) {
    validateTaskCompletion(taskId: $taskId, validationCode: $validationCode) {
        id
        status
        validatedAt
    }
}
"#;

pub const MARK_MESSAGES_AS_READ: &str = r#"
mutation MarkMessagesAsRead($taskId: ID!) {
    markMessagesAsRead(taskId: $taskId)
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::graphql::operation_name;

    #[test]
    fn test_every_document_is_named() {
        let documents = [
            (LOGIN, "Login"),
            (GET_ME, "GetMe"),
            (LIST_TASKS, "GetTasks"),
            (GET_MY_TASKS, "GetMyTasks"),
            (GET_MY_APPLICATIONS, "GetMyApplications"),
            (GET_TASK, "GetTask"),
            (VALIDATE_TASK_COMPLETION, "ValidateTaskCompletion"),
            (MARK_MESSAGES_AS_READ, "MarkMessagesAsRead"),
        ];
        for (document, name) in documents {
            assert_eq!(operation_name(document), Some(name));
        }
    }
}
